//! The legacy file migration pipeline.
//!
//! Two batch stages run in order, each invoked separately by an operator:
//!
//! - [`copy_stage`] copies legacy files into the staging directory and
//!   writes `migration_report.json` there.
//! - [`import_stage`] inserts one `files_new` row per legacy document whose
//!   file is staged and writes the import report.
//!
//! Records are processed one at a time in ascending id order. Per-record
//! failures are accumulated into the report; only setup and teardown
//! failures surface as [`PipelineError`].

pub mod copy_stage;
pub mod error;
pub mod import_stage;
pub mod paths;
pub mod staging;
pub mod store;

pub use error::PipelineError;
pub use paths::StagePaths;
pub use store::{MigrationStore, PgStore};
