use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

#[derive(Debug, Clone)]
pub struct Settings {
    pub reports_dir: PathBuf,
    pub focus_on_open: bool,
    pub recent_runs_shown: usize,
}

impl Default for Settings {
    fn default() -> Self {
        let reports_dir = dirs::data_local_dir()
            .map(|base| base.join("covbench").join("reports"))
            .unwrap_or_else(|| PathBuf::from("./reports"));
        Self {
            reports_dir,
            focus_on_open: true,
            recent_runs_shown: 20,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    reports_dir: Option<PathBuf>,
    focus_on_open: Option<bool>,
    recent_runs_shown: Option<usize>,
}

pub fn load_settings(path: &Path) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        if let Ok(file_cfg) = toml::from_str::<FileSettings>(&raw) {
            if let Some(v) = file_cfg.reports_dir {
                settings.reports_dir = v;
            }
            if let Some(v) = file_cfg.focus_on_open {
                settings.focus_on_open = v;
            }
            if let Some(v) = file_cfg.recent_runs_shown {
                settings.recent_runs_shown = v.max(1);
            }
        }
    }

    if let Ok(v) = std::env::var("WORKBENCH_REPORTS_DIR") {
        settings.reports_dir = PathBuf::from(v);
    }
    if let Ok(v) = std::env::var("APP__REPORTS_DIR") {
        settings.reports_dir = PathBuf::from(v);
    }

    if let Ok(v) = std::env::var("WORKBENCH_FOCUS_ON_OPEN") {
        if let Ok(parsed) = v.parse::<bool>() {
            settings.focus_on_open = parsed;
        }
    }

    if let Ok(v) = std::env::var("WORKBENCH_RECENT_RUNS_SHOWN") {
        if let Ok(parsed) = v.parse::<usize>() {
            settings.recent_runs_shown = parsed.max(1);
        }
    }

    settings
}
