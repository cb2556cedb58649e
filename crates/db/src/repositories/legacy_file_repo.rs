//! Read-only access to the legacy `"Files"` table.

use sqlx::PgPool;

use crate::models::legacy_file::LegacyFile;

pub struct LegacyFileRepo;

impl LegacyFileRepo {
    /// All legacy files with a non-null name, ordered by id ascending.
    pub async fn list_named(pool: &PgPool) -> Result<Vec<LegacyFile>, sqlx::Error> {
        sqlx::query_as::<_, LegacyFile>(
            r#"SELECT
                "FileId"::INTEGER AS file_id,
                "FileName" AS file_name,
                "Folder" AS folder,
                "Size"::BIGINT AS size,
                "ContentType" AS content_type
             FROM "Files"
             WHERE "FileName" IS NOT NULL
             ORDER BY "FileId""#,
        )
        .fetch_all(pool)
        .await
    }
}
