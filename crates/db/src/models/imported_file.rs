//! `files_new` rows created by the import stage.

use serde::Serialize;
use sqlx::FromRow;
use vlex_core::types::{DbId, Timestamp};

/// A row from the `files_new` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ImportedFile {
    pub id: DbId,
    pub original_name: String,
    pub stored_name: String,
    pub mime_type: Option<String>,
    pub size: Option<i64>,
    pub upload_date: Option<Timestamp>,
    pub document_type_id: Option<DbId>,
    pub property_id: Option<DbId>,
    pub document_title: Option<String>,
    pub legacy_document_id: Option<DbId>,
}

/// DTO for inserting one imported legacy document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewImportedFile {
    pub legacy_document_id: DbId,
    pub original_name: String,
    pub stored_name: String,
    pub mime_type: Option<String>,
    pub size: Option<i64>,
    pub upload_date: Option<Timestamp>,
    pub document_type_id: Option<DbId>,
    pub property_id: Option<DbId>,
    pub document_title: Option<String>,
}

/// Verification sample: an imported row with its document type name.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ImportedFileSample {
    pub id: DbId,
    pub original_name: String,
    pub stored_name: String,
    pub document_title: Option<String>,
    pub property_id: Option<DbId>,
    pub document_type: Option<String>,
}
