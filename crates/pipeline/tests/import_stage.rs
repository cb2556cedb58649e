//! Import stage behaviour against a staging directory and an in-memory store.

mod common;

use assert_matches::assert_matches;
use vlex_core::report::{ImportReport, SKIP_REASON_ALREADY_IMPORTED};
use vlex_pipeline::{import_stage, PipelineError};

use common::{legacy_document, stage_paths, write_staged, MemoryStore, INSERT_FAILURE};

#[tokio::test]
async fn renamed_file_is_matched_by_fallback() {
    let root = tempfile::tempdir().expect("root");
    let paths = stage_paths(root.path());
    write_staged(&paths, "lease_166.pdf", "lease").await;
    let store = MemoryStore::with_documents(vec![legacy_document(50, 166, "lease.pdf")]);

    let run = import_stage::run(&store, &paths).await.expect("import stage");
    assert_eq!(run.report.summary.success_count, 1);

    let rows = store.imported();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].original_name, "lease.pdf");
    assert_eq!(rows[0].stored_name, "lease_166.pdf");
    assert_eq!(rows[0].legacy_document_id, Some(50));
    assert_eq!(rows[0].document_title.as_deref(), Some("Document 50"));
}

#[tokio::test]
async fn unstaged_file_is_skipped_not_errored() {
    let root = tempfile::tempdir().expect("root");
    let paths = stage_paths(root.path());
    write_staged(&paths, "other.pdf", "x").await;
    let store = MemoryStore::with_documents(vec![legacy_document(60, 300, "ghost.pdf")]);

    let run = import_stage::run(&store, &paths).await.expect("import stage");
    let s = &run.report.summary;
    assert_eq!((s.total_records, s.success_count, s.skipped_count, s.error_count), (1, 0, 1, 0));
    assert_eq!(
        run.report.skipped[0].reason,
        format!("File not found in {}", paths.staging_dir.display())
    );
    assert!(store.imported().is_empty());
}

#[tokio::test]
async fn insert_failure_is_recorded_and_run_continues() {
    let root = tempfile::tempdir().expect("root");
    let paths = stage_paths(root.path());
    write_staged(&paths, "a.pdf", "a").await;
    write_staged(&paths, "b.pdf", "b").await;
    let mut store = MemoryStore::with_documents(vec![
        legacy_document(1, 10, "a.pdf"),
        legacy_document(2, 11, "b.pdf"),
    ]);
    store.fail_insert_for.insert(1);

    let run = import_stage::run(&store, &paths).await.expect("import stage");
    assert_eq!(run.report.summary.error_count, 1);
    assert_eq!(run.report.summary.success_count, 1);
    assert_eq!(run.report.errors[0].document_id, 1);
    assert!(run.report.errors[0].error.contains(INSERT_FAILURE));
    assert_eq!(store.imported()[0].legacy_document_id, Some(2));
}

#[tokio::test]
async fn rerun_does_not_duplicate_rows() {
    let root = tempfile::tempdir().expect("root");
    let paths = stage_paths(root.path());
    write_staged(&paths, "a.pdf", "a").await;
    let store = MemoryStore::with_documents(vec![legacy_document(1, 10, "a.pdf")]);

    import_stage::run(&store, &paths).await.expect("first run");
    let second = import_stage::run(&store, &paths).await.expect("second run");

    assert_eq!(second.report.summary.success_count, 0);
    assert_eq!(second.report.summary.skipped_count, 1);
    assert_eq!(second.report.skipped[0].reason, SKIP_REASON_ALREADY_IMPORTED);
    assert_eq!(second.verification.total_rows, 1);
}

#[tokio::test]
async fn report_and_verification() {
    let root = tempfile::tempdir().expect("root");
    let paths = stage_paths(root.path());
    write_staged(&paths, "a.pdf", "a").await;
    let mut untyped = legacy_document(2, 11, "a.pdf");
    untyped.document_type_id = None;
    let store = MemoryStore::with_documents(vec![legacy_document(1, 10, "a.pdf"), untyped]);

    let run = import_stage::run(&store, &paths).await.expect("import stage");

    let body = tokio::fs::read_to_string(&paths.import_report_path)
        .await
        .expect("read report");
    let saved: ImportReport = serde_json::from_str(&body).expect("parse report");
    assert_eq!(saved, run.report);

    assert_eq!(run.verification.total_rows, 2);
    let types: Vec<Option<&str>> = run
        .verification
        .samples
        .iter()
        .map(|s| s.document_type.as_deref())
        .collect();
    assert_eq!(types, vec![Some("Lease"), None]);
}

#[tokio::test]
async fn missing_staging_dir_is_fatal() {
    let root = tempfile::tempdir().expect("root");
    let paths = stage_paths(root.path());
    let store = MemoryStore::with_documents(vec![legacy_document(1, 10, "a.pdf")]);

    let result = import_stage::run(&store, &paths).await;
    assert_matches!(result, Err(PipelineError::Io { .. }));
    assert!(store.imported().is_empty());
    assert!(!paths.import_report_path.exists());
}
