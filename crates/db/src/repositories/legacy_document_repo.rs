//! Read-only access to legacy `"vlex_Documents"` joined with `"Files"`.

use sqlx::PgPool;

use crate::models::legacy_document::LegacyDocument;

pub struct LegacyDocumentRepo;

impl LegacyDocumentRepo {
    /// Documents whose file has a non-null name, ordered by document id.
    ///
    /// Documents without a matching file row, or whose file name is null,
    /// are excluded by the inner join and filter.
    pub async fn list_with_named_files(
        pool: &PgPool,
    ) -> Result<Vec<LegacyDocument>, sqlx::Error> {
        sqlx::query_as::<_, LegacyDocument>(
            r#"SELECT
                d."DocumentID"::INTEGER AS document_id,
                d."PropertyID"::INTEGER AS property_id,
                d."DocumentTitle" AS title,
                d."DateAdded"::TIMESTAMP AS date_added,
                d."DocumentTypeID"::INTEGER AS document_type_id,
                d."FileID"::INTEGER AS file_id,
                f."FileName" AS file_name,
                f."ContentType" AS content_type,
                f."Size"::BIGINT AS size
             FROM "vlex_Documents" d
             INNER JOIN "Files" f ON d."FileID" = f."FileId"
             WHERE f."FileName" IS NOT NULL
             ORDER BY d."DocumentID""#,
        )
        .fetch_all(pool)
        .await
    }
}
