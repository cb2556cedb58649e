//! Row models and DTOs.
//!
//! Legacy rows are read-only snapshots mapped by column aliasing onto
//! `FromRow` structs. Destination rows live in `files_new`.

pub mod imported_file;
pub mod legacy_document;
pub mod legacy_file;
