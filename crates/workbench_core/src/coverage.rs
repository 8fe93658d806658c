//! Coverage selection: which report is shown, and whether the panel is open.

use std::sync::Arc;

use crossbeam_channel::Receiver;
use tracing::debug;

use shared::coverage::CoverageSnapshot;

use crate::{
    context::{ContextKey, ContextKeyRegistry},
    observable::ObservableValue,
    views::{ViewError, ViewService, COVERAGE_VIEW},
};

/// Context flag mirroring whether a coverage report is currently open.
pub const COVERAGE_OPEN_CONTEXT: &str = "coverage_report_open";

/// Single source of truth for the selected coverage report.
///
/// The service holds only a shared reference to the report; the report
/// store owns the data. The selection observable and the
/// [`COVERAGE_OPEN_CONTEXT`] flag change together inside
/// [`Self::open_report`] and [`Self::close_report`] and are not settable
/// separately.
pub struct CoverageService {
    selected: ObservableValue<Option<Arc<CoverageSnapshot>>>,
    is_open: ContextKey,
    views: Arc<dyn ViewService>,
}

impl CoverageService {
    pub fn new(contexts: &ContextKeyRegistry, views: Arc<dyn ViewService>) -> Self {
        Self {
            selected: ObservableValue::new(None),
            is_open: contexts.bind(COVERAGE_OPEN_CONTEXT),
            views,
        }
    }

    /// Selects `report` for display, replacing any previous selection.
    /// When `focus` is set, also asks the view service to reveal the
    /// coverage panel with focus; a reveal failure is returned to the
    /// caller unchanged, with the selection already applied.
    pub fn open_report(&self, report: Arc<CoverageSnapshot>, focus: bool) -> Result<(), ViewError> {
        debug!(run = %report.run_id, focus, "opening coverage report");
        self.is_open.set(true);
        self.selected.set(Some(report));

        if focus {
            self.views.open_view(COVERAGE_VIEW, true)?;
        }
        Ok(())
    }

    /// Clears the selection. Safe to call when nothing is open;
    /// subscribers still receive the redundant notification.
    pub fn close_report(&self) {
        debug!("closing coverage report");
        self.is_open.set(false);
        self.selected.set(None);
    }

    /// Currently selected report, if any.
    pub fn selected(&self) -> Option<Arc<CoverageSnapshot>> {
        self.selected.get()
    }

    /// Change stream of the selection; one message per open or close.
    pub fn subscribe(&self) -> Receiver<Option<Arc<CoverageSnapshot>>> {
        self.selected.subscribe()
    }

    pub fn is_open(&self) -> bool {
        self.is_open.get()
    }
}

#[cfg(test)]
#[path = "tests/coverage_tests.rs"]
mod tests;
