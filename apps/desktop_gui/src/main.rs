use std::path::PathBuf;

mod app;
mod config;
mod loader;

use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;

use app::{CoverageWorkbenchApp, UiEvent};
use loader::LoaderCommand;

#[derive(Parser, Debug)]
struct Cli {
    /// Directory scanned for coverage report JSON files. Overrides the
    /// configuration file.
    #[arg(long)]
    reports_dir: Option<PathBuf>,
    /// Path to the workbench configuration file.
    #[arg(long, default_value = "workbench.toml")]
    config: PathBuf,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let cli = Cli::parse();
    let mut settings = config::load_settings(&cli.config);
    if let Some(reports_dir) = cli.reports_dir {
        settings.reports_dir = reports_dir;
    }

    let (cmd_tx, cmd_rx) = bounded::<LoaderCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    loader::spawn_loader_thread(cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Coverage Workbench")
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([820.0, 560.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Coverage Workbench",
        options,
        Box::new(move |_cc| Ok(Box::new(CoverageWorkbenchApp::new(cmd_tx, ui_rx, settings)))),
    )
}
