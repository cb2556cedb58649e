//! Import stage: staged files -> `files_new` rows.
//!
//! Each legacy document is matched against the staged-name listing (display
//! name first, then `<stem>_<file_id><ext>`). Matched documents are inserted
//! keyed on their legacy document id; unmatched ones are skipped. After the
//! report is written a read-only verification logs the row count and a few
//! sample rows.

use std::collections::HashSet;

use chrono::Utc;
use serde::Serialize;
use vlex_core::naming::resolve_staged_name;
use vlex_core::report::{
    skip_reason_not_staged, ImportErrorEntry, ImportOutcome, ImportReport, SkippedEntry,
    SKIP_REASON_ALREADY_IMPORTED,
};
use vlex_db::models::imported_file::{ImportedFileSample, NewImportedFile};
use vlex_db::models::legacy_document::LegacyDocument;

use crate::error::PipelineError;
use crate::paths::StagePaths;
use crate::staging;
use crate::store::MigrationStore;

/// Number of imported rows echoed during verification.
pub const VERIFICATION_SAMPLE_LIMIT: i64 = 5;

/// What to do with one legacy document, decided before touching the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannedImport {
    Insert(NewImportedFile),
    Skip(SkippedEntry),
}

/// Post-import read of the destination table.
#[derive(Debug, Clone, Serialize)]
pub struct ImportVerification {
    pub total_rows: i64,
    pub samples: Vec<ImportedFileSample>,
}

/// Result of a completed import run.
#[derive(Debug, Clone)]
pub struct ImportRun {
    pub report: ImportReport,
    pub verification: ImportVerification,
}

/// Decide, for each document in order, whether it is inserted or skipped.
pub fn plan_import(
    documents: Vec<LegacyDocument>,
    staged: &HashSet<String>,
    staging_label: &str,
) -> Vec<PlannedImport> {
    documents
        .into_iter()
        .map(|doc| match resolve_staged_name(&doc.file_name, doc.file_id, staged) {
            Some(found) => PlannedImport::Insert(NewImportedFile {
                legacy_document_id: doc.document_id,
                stored_name: found.into_stored_name(),
                original_name: doc.file_name,
                mime_type: doc.content_type,
                size: doc.size,
                upload_date: doc.date_added,
                document_type_id: doc.document_type_id,
                property_id: doc.property_id,
                document_title: doc.title,
            }),
            None => PlannedImport::Skip(SkippedEntry {
                document_id: doc.document_id,
                file_name: doc.file_name,
                reason: skip_reason_not_staged(staging_label),
            }),
        })
        .collect()
}

/// Run the import stage, persist its report, then verify.
///
/// Fails only if the document query, the staging listing, the report
/// write, or the verification read fails. The report is written before
/// verification, so it survives a verification failure.
pub async fn run<S: MigrationStore>(
    store: &S,
    paths: &StagePaths,
) -> Result<ImportRun, PipelineError> {
    tracing::info!(staging_dir = %paths.staging_dir.display(), "Starting legacy data import");

    let documents = store.legacy_documents().await?;
    tracing::info!(count = documents.len(), "Loaded legacy document records");

    let staged = staging::list_staged_names(&paths.staging_dir).await?;
    tracing::info!(count = staged.len(), "Staged files available");

    let plan = plan_import(documents, &staged, &paths.staging_label());
    let mut outcomes = Vec::with_capacity(plan.len());
    for planned in plan {
        outcomes.push(execute(store, planned).await);
    }

    let report = ImportReport::from_outcomes(Utc::now(), outcomes);
    staging::write_report(&paths.import_report_path, &report).await?;
    log_summary(&report);
    tracing::info!(path = %paths.import_report_path.display(), "Import report saved");

    let verification = verify(store).await?;
    Ok(ImportRun {
        report,
        verification,
    })
}

/// Carry out one planned import. Never fails; every problem becomes an outcome.
pub async fn execute<S: MigrationStore>(store: &S, planned: PlannedImport) -> ImportOutcome {
    let input = match planned {
        PlannedImport::Insert(input) => input,
        PlannedImport::Skip(entry) => {
            tracing::warn!(
                document_id = entry.document_id,
                file_name = %entry.file_name,
                "Skipping document, file not staged"
            );
            return ImportOutcome::Skipped(entry);
        }
    };

    match store.insert_imported_file(&input).await {
        Ok(Some(imported_id)) => {
            tracing::info!(
                document_id = input.legacy_document_id,
                imported_id,
                title = input.document_title.as_deref().unwrap_or(""),
                stored_name = %input.stored_name,
                "Imported"
            );
            ImportOutcome::Imported {
                document_id: input.legacy_document_id,
                imported_id,
                stored_name: input.stored_name,
            }
        }
        Ok(None) => {
            tracing::warn!(
                document_id = input.legacy_document_id,
                file_name = %input.original_name,
                "Skipping document, already imported"
            );
            ImportOutcome::Skipped(SkippedEntry {
                document_id: input.legacy_document_id,
                file_name: input.original_name,
                reason: SKIP_REASON_ALREADY_IMPORTED.to_string(),
            })
        }
        Err(e) => {
            tracing::error!(
                document_id = input.legacy_document_id,
                file_name = %input.original_name,
                error = %e,
                "Import failed"
            );
            ImportOutcome::Failed(ImportErrorEntry {
                document_id: input.legacy_document_id,
                file_name: input.original_name,
                error: e.to_string(),
            })
        }
    }
}

/// Count destination rows and sample a few of them.
pub async fn verify<S: MigrationStore>(store: &S) -> Result<ImportVerification, PipelineError> {
    let total_rows = store.count_imported_files().await?;
    let samples = store
        .sample_imported_files(VERIFICATION_SAMPLE_LIMIT)
        .await?;

    tracing::info!(total_rows, "Rows now in files_new");
    for (index, row) in samples.iter().enumerate() {
        tracing::info!(
            sample = index + 1,
            title = row.document_title.as_deref().unwrap_or(""),
            file = %row.original_name,
            stored = %row.stored_name,
            property_id = ?row.property_id,
            document_type = row.document_type.as_deref().unwrap_or("Unknown"),
            "Sample imported record"
        );
    }

    Ok(ImportVerification {
        total_rows,
        samples,
    })
}

fn log_summary(report: &ImportReport) {
    let s = &report.summary;
    tracing::info!(
        total = s.total_records,
        imported = s.success_count,
        skipped = s.skipped_count,
        errors = s.error_count,
        "Import summary"
    );
    for entry in &report.skipped {
        tracing::warn!(
            document_id = entry.document_id,
            file_name = %entry.file_name,
            reason = %entry.reason,
            "Skipped"
        );
    }
    for entry in &report.errors {
        tracing::error!(
            document_id = entry.document_id,
            file_name = %entry.file_name,
            error = %entry.error,
            "Import error"
        );
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
