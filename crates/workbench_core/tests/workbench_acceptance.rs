use std::{
    env, fs,
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};

use workbench_core::{
    ContextKeyRegistry, CoverageService, PanelRegistry, ReportStore, ViewId, ViewService,
    COVERAGE_OPEN_CONTEXT, COVERAGE_VIEW,
};

const PROBLEMS_VIEW: ViewId = ViewId("workbench.view.problems");

const REPORT_JSON: &str = r#"{
    "run_id": "7be65e8a-2b1f-4f8e-b6cf-0f6a7f9f2a51",
    "label": "acceptance run",
    "generated_at": "2026-03-04T08:30:00Z",
    "files": [
        {
            "path": "src/lib.rs",
            "statements": { "covered": 18, "total": 24 },
            "branches": { "covered": 3, "total": 6 }
        },
        {
            "path": "src/util.rs",
            "statements": { "covered": 9, "total": 9 }
        }
    ]
}"#;

#[test]
fn open_close_lifecycle_against_real_panels_and_store() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let reports_dir = env::temp_dir().join(format!("covbench_acceptance_{suffix}"));
    fs::create_dir_all(&reports_dir).expect("reports dir");
    fs::write(reports_dir.join("acceptance.json"), REPORT_JSON).expect("write report");

    let mut store = ReportStore::new();
    let loaded = store.load_dir(&reports_dir).expect("scan reports dir");
    assert_eq!(loaded, 1);
    let report = store.reports().first().cloned().expect("loaded report");
    assert_eq!(report.totals().statements.covered, 27);

    let contexts = ContextKeyRegistry::new();
    let panels = PanelRegistry::new();
    panels.register(COVERAGE_VIEW);
    panels.register(PROBLEMS_VIEW);
    panels.open_view(PROBLEMS_VIEW, true).expect("focus problems");

    let service = CoverageService::new(&contexts, Arc::new(panels.clone()));
    let selection = service.subscribe();

    service
        .open_report(Arc::clone(&report), true)
        .expect("open coverage");

    // Selection, flag, and panel state all agree after opening.
    let selected = service.selected().expect("selection present");
    assert!(Arc::ptr_eq(&selected, &report));
    assert!(contexts.is_set(COVERAGE_OPEN_CONTEXT));
    assert!(panels.is_visible(COVERAGE_VIEW));
    assert_eq!(panels.focused_view(), Some(COVERAGE_VIEW));
    assert_eq!(
        selection.try_recv().expect("open notification").map(|r| r.label.clone()),
        Some("acceptance run".to_string())
    );

    service.close_report();

    // Closing clears selection and flag; the panel itself stays where
    // the shell put it.
    assert!(service.selected().is_none());
    assert!(!contexts.is_set(COVERAGE_OPEN_CONTEXT));
    assert!(panels.is_visible(COVERAGE_VIEW));
    assert!(selection.try_recv().expect("close notification").is_none());

    fs::remove_dir_all(reports_dir).expect("cleanup");
}
