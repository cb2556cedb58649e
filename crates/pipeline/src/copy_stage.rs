//! Copy stage: legacy tree -> staging directory.
//!
//! For each named legacy file, in file id order, the expected source
//! `<legacy-root>/<folder>/<name>` is checked and copied into the staging
//! directory. Missing sources and failed copies are recorded and the run
//! continues; the stage always visits every record.

use chrono::Utc;
use vlex_core::naming::validate_display_name;
use vlex_core::report::{
    CopyErrorEntry, CopyOutcome, CopyReport, NotFoundEntry, NOT_FOUND_LOG_LIMIT,
};
use vlex_db::models::legacy_file::LegacyFile;

use crate::error::PipelineError;
use crate::paths::StagePaths;
use crate::staging;
use crate::store::MigrationStore;

/// Run the copy stage and persist its report.
///
/// Fails only if the legacy file query, the staging directory, or the
/// report write fails.
pub async fn run<S: MigrationStore>(
    store: &S,
    paths: &StagePaths,
) -> Result<CopyReport, PipelineError> {
    tracing::info!(
        legacy_root = %paths.legacy_root.display(),
        staging_dir = %paths.staging_dir.display(),
        "Starting legacy file copy"
    );
    staging::ensure_dir(&paths.staging_dir).await?;

    let files = store.legacy_files().await?;
    tracing::info!(count = files.len(), "Loaded legacy file records");

    let mut outcomes = Vec::with_capacity(files.len());
    for file in &files {
        outcomes.push(copy_one(paths, file).await);
    }

    let report = CopyReport::from_outcomes(Utc::now(), outcomes);
    let report_path = paths.copy_report_path();
    staging::write_report(&report_path, &report).await?;

    log_summary(&report);
    tracing::info!(path = %report_path.display(), "Copy report saved");
    Ok(report)
}

/// Process one legacy file. Never fails; every problem becomes an outcome.
pub async fn copy_one(paths: &StagePaths, file: &LegacyFile) -> CopyOutcome {
    let failed = |error: String| {
        tracing::error!(file_id = file.file_id, file_name = %file.file_name, %error, "Copy failed");
        CopyOutcome::Failed(CopyErrorEntry {
            file_id: file.file_id,
            file_name: file.file_name.clone(),
            error,
        })
    };

    if let Err(e) = validate_display_name(&file.file_name) {
        return failed(e.to_string());
    }

    let source = match paths.legacy_source(file.folder.as_deref(), &file.file_name) {
        Ok(source) => source,
        Err(e) => return failed(e.to_string()),
    };
    match tokio::fs::try_exists(&source).await {
        Ok(true) => {}
        Ok(false) => {
            let expected_path = source.display().to_string();
            tracing::warn!(file_id = file.file_id, path = %expected_path, "Source file not found");
            return CopyOutcome::NotFound(NotFoundEntry {
                file_id: file.file_id,
                file_name: file.file_name.clone(),
                expected_path,
            });
        }
        Err(e) => return failed(e.to_string()),
    }

    match staging::stage_file(&source, &paths.staging_dir, &file.file_name, file.file_id).await {
        Ok(staged) => {
            if staged.renamed {
                tracing::info!(
                    file_id = file.file_id,
                    file_name = %file.file_name,
                    stored_name = %staged.stored_name,
                    "Copied (renamed)"
                );
            } else {
                tracing::info!(file_id = file.file_id, file_name = %file.file_name, "Copied");
            }
            CopyOutcome::Copied {
                file_id: file.file_id,
                stored_name: staged.stored_name,
                renamed: staged.renamed,
            }
        }
        Err(e) => failed(e.to_string()),
    }
}

fn log_summary(report: &CopyReport) {
    let s = &report.summary;
    tracing::info!(
        total = s.total_files,
        copied = s.success_count,
        not_found = s.not_found_count,
        errors = s.error_count,
        "Copy summary"
    );

    for entry in report.not_found.iter().take(NOT_FOUND_LOG_LIMIT) {
        tracing::warn!(
            file_id = entry.file_id,
            file_name = %entry.file_name,
            expected_path = %entry.expected_path,
            "Not found"
        );
    }
    if report.not_found.len() > NOT_FOUND_LOG_LIMIT {
        tracing::warn!(
            remaining = report.not_found.len() - NOT_FOUND_LOG_LIMIT,
            "More files not found, see the report"
        );
    }

    for entry in &report.errors {
        tracing::error!(
            file_id = entry.file_id,
            file_name = %entry.file_name,
            error = %entry.error,
            "Copy error"
        );
    }
}
