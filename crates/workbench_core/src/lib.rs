pub mod context;
pub mod coverage;
pub mod observable;
pub mod panels;
pub mod report_store;
pub mod views;

pub use context::{ContextKey, ContextKeyRegistry};
pub use coverage::{CoverageService, COVERAGE_OPEN_CONTEXT};
pub use observable::ObservableValue;
pub use panels::{PanelRegistry, PanelState};
pub use report_store::ReportStore;
pub use views::{ViewError, ViewId, ViewService, COVERAGE_VIEW};
