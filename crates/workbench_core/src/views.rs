use std::fmt;

use thiserror::Error;

/// Identifier of a panel the workbench can reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewId(pub &'static str);

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// The coverage results panel.
pub const COVERAGE_VIEW: ViewId = ViewId("workbench.view.coverage");

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ViewError {
    #[error("no view registered under id {0}")]
    UnknownView(ViewId),
}

/// Reveals and hides workbench panels by identifier. Implemented by the
/// host shell and handed to consumers at construction time.
pub trait ViewService: Send + Sync {
    /// Makes `view` visible; when `focus` is set, also moves focus to it.
    fn open_view(&self, view: ViewId, focus: bool) -> Result<(), ViewError>;

    fn close_view(&self, view: ViewId) -> Result<(), ViewError>;
}
