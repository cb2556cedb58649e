//! Shared fixtures for stage tests: an in-memory [`MigrationStore`] and
//! helpers for building legacy rows and directory layouts.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Mutex;

use chrono::NaiveDate;
use vlex_core::types::DbId;
use vlex_db::models::imported_file::{ImportedFile, ImportedFileSample, NewImportedFile};
use vlex_db::models::legacy_document::LegacyDocument;
use vlex_db::models::legacy_file::LegacyFile;
use vlex_pipeline::{MigrationStore, StagePaths};

/// Error message returned for documents configured to fail on insert.
pub const INSERT_FAILURE: &str = "value too long for type character varying(255)";

/// In-memory store mirroring the Postgres behaviour the stages rely on:
/// ordered legacy reads and inserts keyed on the legacy document id.
#[derive(Default)]
pub struct MemoryStore {
    pub files: Vec<LegacyFile>,
    pub documents: Vec<LegacyDocument>,
    pub document_types: HashMap<DbId, String>,
    pub fail_insert_for: HashSet<DbId>,
    pub fail_queries: bool,
    imported: Mutex<Vec<ImportedFile>>,
}

impl MemoryStore {
    pub fn with_files(files: Vec<LegacyFile>) -> Self {
        Self {
            files,
            ..Self::default()
        }
    }

    pub fn with_documents(documents: Vec<LegacyDocument>) -> Self {
        Self {
            documents,
            document_types: HashMap::from([(1, "Lease".to_string())]),
            ..Self::default()
        }
    }

    /// A store whose reads all fail, as if the pool were unreachable.
    pub fn failing() -> Self {
        Self {
            fail_queries: true,
            ..Self::default()
        }
    }

    pub fn imported(&self) -> Vec<ImportedFile> {
        self.imported.lock().expect("lock").clone()
    }

    fn query_error(&self) -> Result<(), sqlx::Error> {
        if self.fail_queries {
            Err(sqlx::Error::PoolTimedOut)
        } else {
            Ok(())
        }
    }
}

impl MigrationStore for MemoryStore {
    async fn legacy_files(&self) -> Result<Vec<LegacyFile>, sqlx::Error> {
        self.query_error()?;
        let mut files = self.files.clone();
        files.sort_by_key(|f| f.file_id);
        Ok(files)
    }

    async fn legacy_documents(&self) -> Result<Vec<LegacyDocument>, sqlx::Error> {
        self.query_error()?;
        let mut documents = self.documents.clone();
        documents.sort_by_key(|d| d.document_id);
        Ok(documents)
    }

    async fn insert_imported_file(
        &self,
        input: &NewImportedFile,
    ) -> Result<Option<DbId>, sqlx::Error> {
        if self.fail_insert_for.contains(&input.legacy_document_id) {
            return Err(sqlx::Error::Protocol(INSERT_FAILURE.to_string()));
        }
        let mut rows = self.imported.lock().expect("lock");
        if rows
            .iter()
            .any(|r| r.legacy_document_id == Some(input.legacy_document_id))
        {
            return Ok(None);
        }
        let id = rows.len() as DbId + 1;
        rows.push(ImportedFile {
            id,
            original_name: input.original_name.clone(),
            stored_name: input.stored_name.clone(),
            mime_type: input.mime_type.clone(),
            size: input.size,
            upload_date: input.upload_date,
            document_type_id: input.document_type_id,
            property_id: input.property_id,
            document_title: input.document_title.clone(),
            legacy_document_id: Some(input.legacy_document_id),
        });
        Ok(Some(id))
    }

    async fn count_imported_files(&self) -> Result<i64, sqlx::Error> {
        self.query_error()?;
        Ok(self.imported.lock().expect("lock").len() as i64)
    }

    async fn sample_imported_files(
        &self,
        limit: i64,
    ) -> Result<Vec<ImportedFileSample>, sqlx::Error> {
        self.query_error()?;
        let rows = self.imported.lock().expect("lock");
        Ok(rows
            .iter()
            .filter(|r| r.property_id.is_some())
            .take(limit as usize)
            .map(|r| ImportedFileSample {
                id: r.id,
                original_name: r.original_name.clone(),
                stored_name: r.stored_name.clone(),
                document_title: r.document_title.clone(),
                property_id: r.property_id,
                document_type: r
                    .document_type_id
                    .and_then(|id| self.document_types.get(&id).cloned()),
            })
            .collect())
    }
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

pub fn legacy_file(file_id: DbId, file_name: &str, folder: Option<&str>) -> LegacyFile {
    LegacyFile {
        file_id,
        file_name: file_name.to_string(),
        folder: folder.map(str::to_string),
        size: Some(1024),
        content_type: Some("application/pdf".to_string()),
    }
}

pub fn legacy_document(document_id: DbId, file_id: DbId, file_name: &str) -> LegacyDocument {
    LegacyDocument {
        document_id,
        property_id: Some(12),
        title: Some(format!("Document {document_id}")),
        date_added: NaiveDate::from_ymd_opt(2020, 1, 15).and_then(|d| d.and_hms_opt(10, 0, 0)),
        document_type_id: Some(1),
        file_id,
        file_name: file_name.to_string(),
        content_type: Some("application/pdf".to_string()),
        size: Some(1024),
    }
}

/// Stage paths rooted in a test directory: `Old_Files/`, `uploads/temp/`
/// and `import_report.json`.
pub fn stage_paths(root: &Path) -> StagePaths {
    StagePaths {
        legacy_root: root.join("Old_Files"),
        staging_dir: root.join("uploads").join("temp"),
        import_report_path: root.join("import_report.json"),
    }
}

/// Write a legacy source file under `<legacy-root>/<folder>/<name>`.
pub async fn write_legacy(paths: &StagePaths, folder: Option<&str>, name: &str, body: &str) {
    let path = paths
        .legacy_source(folder, name)
        .expect("legacy folder under root");
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await.expect("create legacy dir");
    }
    tokio::fs::write(&path, body).await.expect("write legacy file");
}

/// Write a file directly into the staging directory.
pub async fn write_staged(paths: &StagePaths, name: &str, body: &str) {
    tokio::fs::create_dir_all(&paths.staging_dir)
        .await
        .expect("create staging dir");
    tokio::fs::write(paths.staging_dir.join(name), body)
        .await
        .expect("write staged file");
}

pub async fn read_staged(paths: &StagePaths, name: &str) -> String {
    tokio::fs::read_to_string(paths.staging_dir.join(name))
        .await
        .unwrap_or_else(|e| panic!("read staged {name}: {e}"))
}
