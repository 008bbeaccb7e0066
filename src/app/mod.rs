pub mod charts;
mod controller;
mod state;
mod ui;

use crate::analysis::SelectedFile;
use eframe::{egui, App};
use rfd::FileDialog;
use std::time::Duration;

pub use controller::AnalysisController;
pub use state::{AnalysisOutcome, AnalysisState, ResultLinks, View};

pub const APP_TITLE: &str = "Indie Game Review Analysis";

pub struct ReviewDashboard {
    controller: AnalysisController,
}

impl ReviewDashboard {
    pub fn new(cc: &eframe::CreationContext<'_>, controller: AnalysisController) -> Self {
        tracing::info!("Initializing dashboard against {}", controller.base_url());
        // Result charts are loaded straight from their URLs.
        egui_extras::install_image_loaders(&cc.egui_ctx);

        Self { controller }
    }

    pub fn pick_file(&mut self) {
        if let Some(path) = FileDialog::new()
            .set_title("Choose a review CSV")
            .add_filter("CSV", &["csv"])
            .pick_file()
        {
            self.controller.select_file(SelectedFile::from_path(path));
        }
    }

    pub fn open_report(&self, url: &str) {
        tracing::info!("Opening report {}", url);
        if let Err(e) = open::that(url) {
            tracing::warn!("Failed to open {}: {}", url, e);
        }
    }

    pub fn update_state(&mut self, ctx: &egui::Context) {
        if self.controller.poll() {
            ctx.request_repaint();
        }

        // Nothing else wakes the UI when the worker finishes.
        if self.controller.is_loading() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}

impl App for ReviewDashboard {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_state(ctx);
        self.render(ctx);
    }
}
