//! Egui application state for the coverage workbench.

use std::{path::PathBuf, sync::Arc};

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use shared::coverage::{CoverageCounts, CoverageSnapshot};
use workbench_core::{
    ContextKeyRegistry, CoverageService, PanelRegistry, ViewService, COVERAGE_OPEN_CONTEXT,
    COVERAGE_VIEW,
};

use crate::config::Settings;
use crate::loader::{queue_command, LoaderCommand};

pub enum UiEvent {
    ReportLoaded {
        snapshot: Arc<CoverageSnapshot>,
    },
    ReportLoadFailed {
        path: PathBuf,
        reason: String,
    },
    ScanFinished {
        dir: PathBuf,
        loaded: usize,
    },
    ScanFailed {
        dir: PathBuf,
        reason: String,
    },
}

pub struct CoverageWorkbenchApp {
    cmd_tx: Sender<LoaderCommand>,
    ui_rx: Receiver<UiEvent>,

    contexts: ContextKeyRegistry,
    panels: PanelRegistry,
    coverage: CoverageService,
    selection_rx: Receiver<Option<Arc<CoverageSnapshot>>>,

    settings: Settings,
    runs: Vec<Arc<CoverageSnapshot>>,
    status: String,
}

impl CoverageWorkbenchApp {
    pub fn new(cmd_tx: Sender<LoaderCommand>, ui_rx: Receiver<UiEvent>, settings: Settings) -> Self {
        let contexts = ContextKeyRegistry::new();
        let panels = PanelRegistry::new();
        panels.register(COVERAGE_VIEW);
        let views: Arc<dyn ViewService> = Arc::new(panels.clone());
        let coverage = CoverageService::new(&contexts, views);
        let selection_rx = coverage.subscribe();

        let mut status = format!("Scanning {}", settings.reports_dir.display());
        queue_command(
            &cmd_tx,
            LoaderCommand::ScanDirectory {
                dir: settings.reports_dir.clone(),
            },
            &mut status,
        );

        Self {
            cmd_tx,
            ui_rx,
            contexts,
            panels,
            coverage,
            selection_rx,
            settings,
            runs: Vec::new(),
            status,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::ReportLoaded { snapshot } => {
                    self.runs.retain(|run| run.run_id != snapshot.run_id);
                    self.runs.push(snapshot);
                    self.runs
                        .sort_by(|a, b| b.generated_at.cmp(&a.generated_at));
                }
                UiEvent::ReportLoadFailed { path, reason } => {
                    self.status = format!("Failed to load {}: {reason}", path.display());
                }
                UiEvent::ScanFinished { dir, loaded } => {
                    self.status = format!("Loaded {loaded} report(s) from {}", dir.display());
                }
                UiEvent::ScanFailed { dir, reason } => {
                    self.status = format!("Failed to scan {}: {reason}", dir.display());
                }
            }
        }
    }

    fn drain_selection_changes(&mut self) {
        while let Ok(selected) = self.selection_rx.try_recv() {
            self.status = match selected {
                Some(report) => format!("Showing coverage for {}", report.label),
                None => "Coverage closed".to_string(),
            };
        }
    }

    fn open_run(&mut self, report: Arc<CoverageSnapshot>, focus: bool) {
        if let Err(err) = self.coverage.open_report(report, focus) {
            self.status = format!("Failed to reveal coverage panel: {err}");
        }
    }

    fn close_coverage(&mut self) {
        self.coverage.close_report();
    }

    fn rescan(&mut self) {
        let dir = self.settings.reports_dir.clone();
        self.status = format!("Scanning {}", dir.display());
        queue_command(
            &self.cmd_tx,
            LoaderCommand::ScanDirectory { dir },
            &mut self.status,
        );
    }

    fn pick_report_file(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Coverage reports", &["json"])
            .pick_file()
        {
            queue_command(
                &self.cmd_tx,
                LoaderCommand::LoadReport { path },
                &mut self.status,
            );
        }
    }

    fn show_toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading("Coverage Workbench");
            ui.separator();

            if ui.button("Open report…").clicked() {
                self.pick_report_file();
            }
            if ui.button("Rescan").clicked() {
                self.rescan();
            }

            ui.checkbox(&mut self.settings.focus_on_open, "Focus panel on open");

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                // Enabled from the published context flag, the same way
                // menu items elsewhere would gate on it.
                let close = ui.add_enabled(
                    self.contexts.is_set(COVERAGE_OPEN_CONTEXT),
                    egui::Button::new("Close coverage"),
                );
                if close.clicked() {
                    self.close_coverage();
                }
            });
        });
    }

    fn show_run_list(&mut self, ui: &mut egui::Ui) {
        ui.strong("Test runs");
        ui.small(format!("from {}", self.settings.reports_dir.display()));
        ui.separator();

        if self.runs.is_empty() {
            ui.weak("No coverage reports loaded yet.");
            return;
        }

        let selected_run = self.coverage.selected().map(|report| report.run_id);
        let focus = self.settings.focus_on_open;
        let mut to_open = None;

        egui::ScrollArea::vertical().show(ui, |ui| {
            for run in self.runs.iter().take(self.settings.recent_runs_shown) {
                let is_selected = selected_run == Some(run.run_id);
                ui.horizontal(|ui| {
                    let label = if is_selected {
                        egui::RichText::new(&run.label).strong()
                    } else {
                        egui::RichText::new(&run.label)
                    };
                    ui.label(label);
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Open").clicked() {
                            to_open = Some(Arc::clone(run));
                        }
                    });
                });
                ui.small(run.generated_at.format("%Y-%m-%d %H:%M UTC").to_string());
                ui.separator();
            }
        });

        if let Some(report) = to_open {
            self.open_run(report, focus);
        }
    }

    fn show_coverage_panel(&mut self, ui: &mut egui::Ui) {
        if !self.panels.is_visible(COVERAGE_VIEW) {
            ui.weak("Coverage panel is hidden. Opening a report with focus reveals it.");
            return;
        }

        ui.horizontal(|ui| {
            ui.strong("Coverage");
            if self
                .panels
                .state(COVERAGE_VIEW)
                .map(|state| state.focused)
                .unwrap_or(false)
            {
                ui.weak("(focused)");
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.small_button("Hide panel").clicked() {
                    if let Err(err) = self.panels.close_view(COVERAGE_VIEW) {
                        self.status = format!("Failed to hide coverage panel: {err}");
                    }
                }
            });
        });
        ui.separator();

        let Some(report) = self.coverage.selected() else {
            ui.weak("No coverage report open.");
            return;
        };

        let totals = report.totals();
        ui.label(egui::RichText::new(&report.label).strong());
        ui.small(format!(
            "{} file(s), generated {}",
            report.file_count(),
            report.generated_at.format("%Y-%m-%d %H:%M UTC")
        ));
        ui.add(
            egui::ProgressBar::new((totals.statements.percent() / 100.0) as f32)
                .text(format!("statements {:.1}%", totals.statements.percent())),
        );
        ui.add_space(8.0);

        egui::ScrollArea::vertical().show(ui, |ui| {
            egui::Grid::new("coverage_files")
                .striped(true)
                .num_columns(4)
                .show(ui, |ui| {
                    ui.strong("File");
                    ui.strong("Statements");
                    ui.strong("Branches");
                    ui.strong("Functions");
                    ui.end_row();

                    for file in &report.files {
                        ui.monospace(&file.path);
                        show_counts_cell(ui, Some(file.statements));
                        show_counts_cell(ui, file.branches);
                        show_counts_cell(ui, file.functions);
                        ui.end_row();
                    }
                });
        });
    }

    fn show_status_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.small("Status:");
            ui.small(egui::RichText::new(&self.status).weak());
        });
    }
}

fn show_counts_cell(ui: &mut egui::Ui, counts: Option<CoverageCounts>) {
    match counts {
        Some(counts) => {
            let percent = counts.percent();
            ui.label(
                egui::RichText::new(format!(
                    "{}/{} ({percent:.1}%)",
                    counts.covered, counts.total
                ))
                .color(percent_color(percent)),
            );
        }
        None => {
            ui.weak("–");
        }
    }
}

fn percent_color(percent: f64) -> egui::Color32 {
    if percent >= 80.0 {
        egui::Color32::GREEN
    } else if percent >= 50.0 {
        egui::Color32::YELLOW
    } else {
        egui::Color32::RED
    }
}

impl eframe::App for CoverageWorkbenchApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.drain_selection_changes();

        egui::TopBottomPanel::top("workbench_toolbar").show(ctx, |ui| self.show_toolbar(ui));
        egui::TopBottomPanel::bottom("workbench_status").show(ctx, |ui| self.show_status_bar(ui));
        egui::SidePanel::left("run_list")
            .default_width(300.0)
            .show(ctx, |ui| self.show_run_list(ui));
        egui::CentralPanel::default().show(ctx, |ui| self.show_coverage_panel(ui));

        // Loader events arrive off-frame; keep polling at a low rate.
        ctx.request_repaint_after(std::time::Duration::from_millis(200));
    }
}
