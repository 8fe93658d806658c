use super::*;

use chrono::Utc;
use parking_lot::Mutex;

use crate::views::ViewId;
use shared::coverage::{CoverageCounts, FileCoverage};
use shared::domain::RunId;

struct RecordingViewService {
    calls: Mutex<Vec<(ViewId, bool)>>,
    fail_with: Option<ViewError>,
}

impl RecordingViewService {
    fn ok() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_with: None,
        }
    }

    fn failing(err: ViewError) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_with: Some(err),
        }
    }

    fn calls(&self) -> Vec<(ViewId, bool)> {
        self.calls.lock().clone()
    }
}

impl ViewService for RecordingViewService {
    fn open_view(&self, view: ViewId, focus: bool) -> Result<(), ViewError> {
        self.calls.lock().push((view, focus));
        match &self.fail_with {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn close_view(&self, _view: ViewId) -> Result<(), ViewError> {
        Ok(())
    }
}

fn report(label: &str) -> Arc<CoverageSnapshot> {
    Arc::new(CoverageSnapshot {
        run_id: RunId::new(),
        label: label.to_string(),
        generated_at: Utc::now(),
        files: vec![FileCoverage {
            path: "src/lib.rs".to_string(),
            statements: CoverageCounts::new(1, 2),
            branches: None,
            functions: None,
        }],
    })
}

fn service_over(views: Arc<RecordingViewService>) -> (ContextKeyRegistry, CoverageService) {
    let contexts = ContextKeyRegistry::new();
    let service = CoverageService::new(&contexts, views);
    (contexts, service)
}

#[test]
fn open_selects_the_report_and_raises_the_flag() {
    let views = Arc::new(RecordingViewService::ok());
    let (contexts, service) = service_over(Arc::clone(&views));
    let run = report("run a");

    service
        .open_report(Arc::clone(&run), true)
        .expect("open report");

    let selected = service.selected().expect("selection present");
    assert!(Arc::ptr_eq(&selected, &run));
    assert!(service.is_open());
    assert!(contexts.is_set(COVERAGE_OPEN_CONTEXT));
}

#[test]
fn open_then_close_clears_selection_and_flag() {
    let views = Arc::new(RecordingViewService::ok());
    let (contexts, service) = service_over(views);

    service.open_report(report("run a"), true).expect("open");
    service.close_report();

    assert!(service.selected().is_none());
    assert!(!service.is_open());
    assert!(!contexts.is_set(COVERAGE_OPEN_CONTEXT));
}

#[test]
fn close_on_a_fresh_service_is_a_no_op_in_effect() {
    let views = Arc::new(RecordingViewService::ok());
    let (_contexts, service) = service_over(views);
    let rx = service.subscribe();

    service.close_report();

    assert!(service.selected().is_none());
    assert!(!service.is_open());
    // Subscribers still get the redundant notification.
    assert!(rx.try_recv().expect("notification").is_none());
    assert!(rx.try_recv().is_err());
}

#[test]
fn reopening_replaces_the_selection() {
    let views = Arc::new(RecordingViewService::ok());
    let (_contexts, service) = service_over(views);
    let first = report("run a");
    let second = report("run b");

    service.open_report(first, true).expect("open first");
    service
        .open_report(Arc::clone(&second), true)
        .expect("open second");

    let selected = service.selected().expect("selection present");
    assert!(Arc::ptr_eq(&selected, &second));
    assert!(service.is_open());
}

#[test]
fn focus_controls_the_view_reveal() {
    let views = Arc::new(RecordingViewService::ok());
    let (_contexts, service) = service_over(Arc::clone(&views));

    service
        .open_report(report("quiet"), false)
        .expect("open without focus");
    assert!(views.calls().is_empty());

    service
        .open_report(report("focused"), true)
        .expect("open with focus");
    assert_eq!(views.calls(), vec![(COVERAGE_VIEW, true)]);
}

#[test]
fn every_mutation_notifies_exactly_once() {
    let views = Arc::new(RecordingViewService::ok());
    let (_contexts, service) = service_over(views);
    let rx = service.subscribe();
    let run = report("run a");

    service
        .open_report(Arc::clone(&run), true)
        .expect("first open");
    service.open_report(run, true).expect("redundant open");
    service.close_report();
    service.close_report();

    let notifications: Vec<_> = rx.try_iter().collect();
    assert_eq!(notifications.len(), 4);
    assert!(notifications[0].is_some());
    assert!(notifications[1].is_some());
    assert!(notifications[2].is_none());
    assert!(notifications[3].is_none());
}

#[test]
fn reveal_failure_propagates_with_the_selection_applied() {
    let views = Arc::new(RecordingViewService::failing(ViewError::UnknownView(
        COVERAGE_VIEW,
    )));
    let (contexts, service) = service_over(views);
    let run = report("run a");

    let err = service
        .open_report(Arc::clone(&run), true)
        .expect_err("reveal failure surfaces");
    assert_eq!(err, ViewError::UnknownView(COVERAGE_VIEW));

    // State writes precede the reveal and are not rolled back.
    let selected = service.selected().expect("selection present");
    assert!(Arc::ptr_eq(&selected, &run));
    assert!(contexts.is_set(COVERAGE_OPEN_CONTEXT));
}
