//! Review Dashboard
//!
//! Uploads a CSV of game reviews to the analysis service and shows the
//! generated charts and report.

pub mod analysis;
pub mod app;
pub mod config;
pub mod logging;
pub mod utils;
