//! Loading and ownership of coverage report documents.

use std::{
    fs,
    path::Path,
    sync::Arc,
};

use tracing::{debug, warn};

use shared::{coverage::CoverageSnapshot, domain::RunId, error::ReportError};

/// Loads coverage report files from disk and owns the resulting
/// snapshots. The rest of the workbench holds `Arc` references handed
/// out from here.
#[derive(Default)]
pub struct ReportStore {
    reports: Vec<Arc<CoverageSnapshot>>,
}

impl ReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and validates one report file, keeping it in the store.
    /// Loading a file with an already-known run id replaces the earlier
    /// copy.
    pub fn load_file(&mut self, path: &Path) -> Result<Arc<CoverageSnapshot>, ReportError> {
        let snapshot = Arc::new(load_report(path)?);
        self.reports
            .retain(|existing| existing.run_id != snapshot.run_id);
        self.reports.push(Arc::clone(&snapshot));
        debug!(run = %snapshot.run_id, path = %path.display(), "coverage report loaded");
        Ok(snapshot)
    }

    /// Loads every `*.json` file under `dir` and returns how many were
    /// accepted. Files that fail to parse or validate are skipped with a
    /// warning; an unreadable directory is an error.
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize, ReportError> {
        let entries = fs::read_dir(dir).map_err(|source| ReportError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut loaded = 0;
        for entry in entries {
            let entry = entry.map_err(|source| ReportError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            match self.load_file(&path) {
                Ok(_) => loaded += 1,
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "skipping unusable coverage report");
                }
            }
        }
        Ok(loaded)
    }

    pub fn get(&self, run_id: RunId) -> Option<Arc<CoverageSnapshot>> {
        self.reports
            .iter()
            .find(|report| report.run_id == run_id)
            .cloned()
    }

    pub fn reports(&self) -> &[Arc<CoverageSnapshot>] {
        &self.reports
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }
}

/// Reads and validates one report document without retaining it.
pub fn load_report(path: &Path) -> Result<CoverageSnapshot, ReportError> {
    let raw = fs::read_to_string(path).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let snapshot: CoverageSnapshot =
        serde_json::from_str(&raw).map_err(|source| ReportError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    validate(path, &snapshot)?;
    Ok(snapshot)
}

fn validate(path: &Path, snapshot: &CoverageSnapshot) -> Result<(), ReportError> {
    if snapshot.files.is_empty() {
        return Err(invalid(path, "report contains no files"));
    }
    for file in &snapshot.files {
        if file.path.is_empty() {
            return Err(invalid(path, "file entry with an empty path"));
        }
        if !file.statements.is_consistent() {
            return Err(invalid(
                path,
                format!("{}: covered statements exceed total", file.path),
            ));
        }
        if file.branches.is_some_and(|counts| !counts.is_consistent()) {
            return Err(invalid(
                path,
                format!("{}: covered branches exceed total", file.path),
            ));
        }
        if file.functions.is_some_and(|counts| !counts.is_consistent()) {
            return Err(invalid(
                path,
                format!("{}: covered functions exceed total", file.path),
            ));
        }
    }
    Ok(())
}

fn invalid(path: &Path, reason: impl Into<String>) -> ReportError {
    ReportError::Invalid {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
}

#[cfg(test)]
#[path = "tests/report_store_tests.rs"]
mod tests;
