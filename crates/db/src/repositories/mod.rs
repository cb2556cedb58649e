//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods
//! that accept `&PgPool` as the first argument.

pub mod imported_file_repo;
pub mod legacy_document_repo;
pub mod legacy_file_repo;

pub use imported_file_repo::ImportedFileRepo;
pub use legacy_document_repo::LegacyDocumentRepo;
pub use legacy_file_repo::LegacyFileRepo;
