//! Migration report model.
//!
//! Each stage produces exactly one outcome per input record and folds the
//! outcomes into an immutable report. Because counts are derived from the
//! outcomes, `success + not_found|skipped + error == total` always holds.
//!
//! The serialized shape is the audit artifact operators read after a run,
//! so field names are camelCase.

use serde::{Deserialize, Serialize};

use crate::types::{DbId, ReportTimestamp};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Skip reason for a document whose row is already in `files_new`.
pub const SKIP_REASON_ALREADY_IMPORTED: &str = "Already imported";

/// Number of not-found entries echoed to the log at the end of a copy run.
pub const NOT_FOUND_LOG_LIMIT: usize = 10;

/// Skip reason for a document whose file is not in the staging directory.
pub fn skip_reason_not_staged(staging_label: &str) -> String {
    format!("File not found in {staging_label}")
}

// ---------------------------------------------------------------------------
// Copy stage
// ---------------------------------------------------------------------------

/// A legacy file whose source was missing from the legacy tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotFoundEntry {
    pub file_id: DbId,
    pub file_name: String,
    pub expected_path: String,
}

/// A legacy file whose copy failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyErrorEntry {
    pub file_id: DbId,
    pub file_name: String,
    pub error: String,
}

/// Result of processing one legacy file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied {
        file_id: DbId,
        stored_name: String,
        renamed: bool,
    },
    NotFound(NotFoundEntry),
    Failed(CopyErrorEntry),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CopySummary {
    pub total_files: usize,
    pub success_count: usize,
    pub not_found_count: usize,
    pub error_count: usize,
}

/// Report persisted by the copy stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyReport {
    pub timestamp: ReportTimestamp,
    pub summary: CopySummary,
    pub not_found: Vec<NotFoundEntry>,
    pub errors: Vec<CopyErrorEntry>,
}

impl CopyReport {
    /// Fold per-record outcomes, in processing order, into a report.
    pub fn from_outcomes<I>(timestamp: ReportTimestamp, outcomes: I) -> Self
    where
        I: IntoIterator<Item = CopyOutcome>,
    {
        let empty = Self {
            timestamp,
            summary: CopySummary::default(),
            not_found: Vec::new(),
            errors: Vec::new(),
        };
        outcomes.into_iter().fold(empty, |mut report, outcome| {
            report.summary.total_files += 1;
            match outcome {
                CopyOutcome::Copied { .. } => report.summary.success_count += 1,
                CopyOutcome::NotFound(entry) => {
                    report.summary.not_found_count += 1;
                    report.not_found.push(entry);
                }
                CopyOutcome::Failed(entry) => {
                    report.summary.error_count += 1;
                    report.errors.push(entry);
                }
            }
            report
        })
    }
}

// ---------------------------------------------------------------------------
// Import stage
// ---------------------------------------------------------------------------

/// A legacy document that was not imported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedEntry {
    pub document_id: DbId,
    pub file_name: String,
    pub reason: String,
}

/// A legacy document whose insert failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportErrorEntry {
    pub document_id: DbId,
    pub file_name: String,
    pub error: String,
}

/// Result of processing one legacy document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    Imported {
        document_id: DbId,
        imported_id: DbId,
        stored_name: String,
    },
    Skipped(SkippedEntry),
    Failed(ImportErrorEntry),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub total_records: usize,
    pub success_count: usize,
    pub skipped_count: usize,
    pub error_count: usize,
}

/// Report persisted by the import stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub timestamp: ReportTimestamp,
    pub summary: ImportSummary,
    pub skipped: Vec<SkippedEntry>,
    pub errors: Vec<ImportErrorEntry>,
}

impl ImportReport {
    /// Fold per-record outcomes, in processing order, into a report.
    pub fn from_outcomes<I>(timestamp: ReportTimestamp, outcomes: I) -> Self
    where
        I: IntoIterator<Item = ImportOutcome>,
    {
        let empty = Self {
            timestamp,
            summary: ImportSummary::default(),
            skipped: Vec::new(),
            errors: Vec::new(),
        };
        outcomes.into_iter().fold(empty, |mut report, outcome| {
            report.summary.total_records += 1;
            match outcome {
                ImportOutcome::Imported { .. } => report.summary.success_count += 1,
                ImportOutcome::Skipped(entry) => {
                    report.summary.skipped_count += 1;
                    report.skipped.push(entry);
                }
                ImportOutcome::Failed(entry) => {
                    report.summary.error_count += 1;
                    report.errors.push(entry);
                }
            }
            report
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
