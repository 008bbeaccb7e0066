use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use eframe::egui;
use review_dashboard::analysis::{AnalyzeClient, SelectedFile};
use review_dashboard::app::{AnalysisController, ReviewDashboard, View, APP_TITLE};
use review_dashboard::config::{self, Config};
use review_dashboard::logging;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "review-dashboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Upload game review CSVs for analysis and browse the generated report")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Config file (default: ~/.config/review-dashboard/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Analysis service URL, overrides the config file
    #[arg(long, global = true)]
    base_url: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Open the dashboard window (default)
    Gui,

    /// Analyze a CSV without opening a window
    Analyze {
        /// CSV with `review_text` and `rating` columns
        file: PathBuf,

        /// Download the generated report to this path
        #[arg(long)]
        save_report: Option<PathBuf>,
    },

    /// Print a default config file
    Config,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(Command::Config) = cli.command {
        print!("{}", config::generate_default_config());
        return Ok(());
    }

    let config_path = cli.config.clone().or_else(Config::locate);
    let mut config = match &config_path {
        Some(path) => Config::load_with_env(path)?,
        None => Config::from_env(),
    };
    config.override_base_url(cli.base_url);

    logging::init(&config.logging)?;
    match &config_path {
        Some(path) => tracing::info!("Loaded config from {:?}", path),
        None => tracing::info!("Using default config with environment overrides"),
    }

    let client = Arc::new(AnalyzeClient::new(&config.backend)?);

    match cli.command {
        Some(Command::Analyze { file, save_report }) => {
            run_headless(client, &file, save_report.as_deref())
        }
        _ => run_gui(client, &config),
    }
}

fn run_gui(client: Arc<AnalyzeClient>, config: &Config) -> anyhow::Result<()> {
    let controller = AnalysisController::new(client);
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window.width, config.window.height])
            .with_min_inner_size([600.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        APP_TITLE,
        options,
        Box::new(move |cc| Box::new(ReviewDashboard::new(cc, controller))),
    )
    .map_err(|e| anyhow!("window closed with error: {}", e))
}

fn run_headless(
    client: Arc<AnalyzeClient>,
    file: &Path,
    save_report: Option<&Path>,
) -> anyhow::Result<()> {
    let mut controller = AnalysisController::new(client.clone());
    controller.select_file(SelectedFile::from_path(file));
    controller.analyze();
    controller.wait();

    let links = match controller.view() {
        View::Success(links) => links,
        // The banner text hides local failures behind the backend fallback.
        View::Error(message) => match controller.failure() {
            Some(err) => return Err(anyhow!("{}", err)),
            None => return Err(anyhow!(message)),
        },
        View::Loading | View::Idle => return Err(anyhow!("analysis did not finish")),
    };

    if let Some(message) = &links.message {
        println!("{}", message);
    }
    println!("report:          {}", links.report_url);
    println!("radar chart:     {}", links.radar_chart_url);
    println!("sentiment chart: {}", links.sentiment_pie_url);

    if let Some(path) = save_report {
        let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
        let bytes = runtime.block_on(client.download(&links.report_url))?;
        std::fs::write(path, &bytes).with_context(|| format!("failed to write {:?}", path))?;
        tracing::info!("Saved report ({} bytes) to {:?}", bytes.len(), path);
        println!("saved report to {}", path.display());
    }

    Ok(())
}
