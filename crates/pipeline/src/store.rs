//! The relational store as seen by the pipeline.
//!
//! Stages take a [`MigrationStore`] instead of a pool so they can run
//! against an in-memory implementation in tests. [`PgStore`] is the
//! Postgres implementation backed by the `vlex_db` repositories.

use std::future::Future;

use vlex_core::types::DbId;
use vlex_db::models::imported_file::{ImportedFileSample, NewImportedFile};
use vlex_db::models::legacy_document::LegacyDocument;
use vlex_db::models::legacy_file::LegacyFile;
use vlex_db::repositories::{ImportedFileRepo, LegacyDocumentRepo, LegacyFileRepo};
use vlex_db::DbPool;

/// Reads legacy rows and writes imported rows.
pub trait MigrationStore: Send + Sync {
    /// Legacy files with a non-null name, ordered by file id.
    fn legacy_files(&self) -> impl Future<Output = Result<Vec<LegacyFile>, sqlx::Error>> + Send;

    /// Legacy documents joined with their named file, ordered by document id.
    fn legacy_documents(
        &self,
    ) -> impl Future<Output = Result<Vec<LegacyDocument>, sqlx::Error>> + Send;

    /// Insert one imported row. `None` means the document was already imported.
    fn insert_imported_file(
        &self,
        input: &NewImportedFile,
    ) -> impl Future<Output = Result<Option<DbId>, sqlx::Error>> + Send;

    fn count_imported_files(&self) -> impl Future<Output = Result<i64, sqlx::Error>> + Send;

    /// Up to `limit` imported rows with their document type name.
    fn sample_imported_files(
        &self,
        limit: i64,
    ) -> impl Future<Output = Result<Vec<ImportedFileSample>, sqlx::Error>> + Send;
}

/// [`MigrationStore`] over a Postgres pool. Each call acquires a pooled
/// connection and releases it when the query completes.
pub struct PgStore<'a> {
    pool: &'a DbPool,
}

impl<'a> PgStore<'a> {
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }
}

impl MigrationStore for PgStore<'_> {
    async fn legacy_files(&self) -> Result<Vec<LegacyFile>, sqlx::Error> {
        LegacyFileRepo::list_named(self.pool).await
    }

    async fn legacy_documents(&self) -> Result<Vec<LegacyDocument>, sqlx::Error> {
        LegacyDocumentRepo::list_with_named_files(self.pool).await
    }

    async fn insert_imported_file(
        &self,
        input: &NewImportedFile,
    ) -> Result<Option<DbId>, sqlx::Error> {
        ImportedFileRepo::insert_legacy(self.pool, input).await
    }

    async fn count_imported_files(&self) -> Result<i64, sqlx::Error> {
        ImportedFileRepo::count(self.pool).await
    }

    async fn sample_imported_files(
        &self,
        limit: i64,
    ) -> Result<Vec<ImportedFileSample>, sqlx::Error> {
        ImportedFileRepo::sample_with_document_type(self.pool, limit).await
    }
}
