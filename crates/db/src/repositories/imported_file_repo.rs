//! Repository for the `files_new` table.

use sqlx::PgPool;
use vlex_core::types::DbId;

use crate::models::imported_file::{ImportedFile, ImportedFileSample, NewImportedFile};

/// Column list for files_new queries.
const COLUMNS: &str = r#"id, original_name, stored_name, mime_type, size, upload_date,
    document_type_id, "PropertyID" AS property_id, "DocumentTitle" AS document_title,
    legacy_document_id"#;

pub struct ImportedFileRepo;

impl ImportedFileRepo {
    /// Insert one imported legacy document.
    ///
    /// Returns the new row id, or `None` when a row for the same legacy
    /// document already exists.
    pub async fn insert_legacy(
        pool: &PgPool,
        input: &NewImportedFile,
    ) -> Result<Option<DbId>, sqlx::Error> {
        let row: Option<(DbId,)> = sqlx::query_as(
            r#"INSERT INTO files_new (
                original_name, stored_name, mime_type, size, upload_date,
                document_type_id, "PropertyID", "DocumentTitle", legacy_document_id
             ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             ON CONFLICT (legacy_document_id) DO NOTHING
             RETURNING id"#,
        )
        .bind(&input.original_name)
        .bind(&input.stored_name)
        .bind(&input.mime_type)
        .bind(input.size)
        .bind(input.upload_date)
        .bind(input.document_type_id)
        .bind(input.property_id)
        .bind(&input.document_title)
        .bind(input.legacy_document_id)
        .fetch_optional(pool)
        .await?;
        Ok(row.map(|(id,)| id))
    }

    /// Find the row imported from a legacy document.
    pub async fn find_by_legacy_document_id(
        pool: &PgPool,
        legacy_document_id: DbId,
    ) -> Result<Option<ImportedFile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM files_new WHERE legacy_document_id = $1");
        sqlx::query_as::<_, ImportedFile>(&query)
            .bind(legacy_document_id)
            .fetch_optional(pool)
            .await
    }

    /// Total number of rows in `files_new`.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM files_new")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// First `limit` rows with a property reference, joined with the
    /// document type lookup.
    pub async fn sample_with_document_type(
        pool: &PgPool,
        limit: i64,
    ) -> Result<Vec<ImportedFileSample>, sqlx::Error> {
        sqlx::query_as::<_, ImportedFileSample>(
            r#"SELECT
                f.id,
                f.original_name,
                f.stored_name,
                f."DocumentTitle" AS document_title,
                f."PropertyID" AS property_id,
                dt."TypeName" AS document_type
             FROM files_new f
             LEFT JOIN "vlex_DocumentType" dt ON f.document_type_id = dt."DocumentTypeID"
             WHERE f."PropertyID" IS NOT NULL
             ORDER BY f.id
             LIMIT $1"#,
        )
        .bind(limit)
        .fetch_all(pool)
        .await
    }
}
