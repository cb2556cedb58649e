//! Legacy `"vlex_Documents"` rows joined with their file.

use serde::Serialize;
use sqlx::FromRow;
use vlex_core::types::{DbId, Timestamp};

/// A document row inner-joined with its `"Files"` row.
///
/// Only documents whose file has a non-null name are ever loaded, so
/// `file_name` is not optional.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct LegacyDocument {
    pub document_id: DbId,
    pub property_id: Option<DbId>,
    pub title: Option<String>,
    pub date_added: Option<Timestamp>,
    pub document_type_id: Option<DbId>,
    pub file_id: DbId,
    pub file_name: String,
    pub content_type: Option<String>,
    pub size: Option<i64>,
}
