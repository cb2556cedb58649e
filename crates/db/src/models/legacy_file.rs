//! Legacy `"Files"` rows.

use serde::Serialize;
use sqlx::FromRow;
use vlex_core::types::DbId;

/// A row from the legacy `"Files"` table with a non-null `"FileName"`.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct LegacyFile {
    pub file_id: DbId,
    pub file_name: String,
    /// Folder relative to the legacy root; `None` means the root itself.
    pub folder: Option<String>,
    pub size: Option<i64>,
    pub content_type: Option<String>,
}
