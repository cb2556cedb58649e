//! Stored-name rules for the staging directory.
//!
//! A legacy file is staged under its display name unless that name is
//! already taken, in which case the legacy file id is inserted before the
//! extension (`lease.pdf` -> `lease_166.pdf`). The import stage applies the
//! same rule in reverse to find a document's staged file.

use std::collections::HashSet;

use crate::error::CoreError;
use crate::types::DbId;

/// Name of the copy-stage report artifact inside the staging directory.
///
/// It is never treated as a staged file.
pub const COPY_REPORT_FILE_NAME: &str = "migration_report.json";

/// Maximum length of a display name (matches `files_new.original_name`).
pub const MAX_DISPLAY_NAME_LENGTH: usize = 255;

/// Split a file name into `(stem, extension)`.
///
/// The extension runs from the last `.` to the end of the name and keeps
/// the dot. Names without a dot, dot-files such as `.env`, and `..` have
/// an empty extension.
pub fn split_extension(name: &str) -> (&str, &str) {
    if name == ".." {
        return (name, "");
    }
    match name.rfind('.') {
        None | Some(0) => (name, ""),
        Some(idx) => name.split_at(idx),
    }
}

/// Build the collision-free name `<stem>_<id><ext>`.
pub fn disambiguated_name(name: &str, id: DbId) -> String {
    let (stem, ext) = split_extension(name);
    format!("{stem}_{id}{ext}")
}

/// Reject display names that cannot be used as a single path component.
pub fn validate_display_name(name: &str) -> Result<(), CoreError> {
    if name.is_empty() {
        return Err(CoreError::Validation("File name cannot be empty".to_string()));
    }
    if name.chars().count() > MAX_DISPLAY_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "File name exceeds maximum length of {MAX_DISPLAY_NAME_LENGTH} characters"
        )));
    }
    if name == "." || name == ".." {
        return Err(CoreError::Validation(format!(
            "File name '{name}' is not a valid file name"
        )));
    }
    if name.contains(['/', '\\', '\0']) {
        return Err(CoreError::Validation(format!(
            "File name '{name}' contains a path separator or null byte"
        )));
    }
    Ok(())
}

/// How a document's file was found in the staging directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StagedMatch {
    /// Staged under its display name.
    Direct(String),
    /// Staged under the disambiguated name.
    Renamed(String),
}

impl StagedMatch {
    /// The stored name to record in the destination table.
    pub fn stored_name(&self) -> &str {
        match self {
            Self::Direct(name) | Self::Renamed(name) => name,
        }
    }

    pub fn into_stored_name(self) -> String {
        match self {
            Self::Direct(name) | Self::Renamed(name) => name,
        }
    }
}

/// Look up a legacy file in the staged-name listing.
///
/// The display name wins; the disambiguated name built from `file_id` is the
/// fallback. Returns `None` when neither is staged.
pub fn resolve_staged_name(
    display_name: &str,
    file_id: DbId,
    staged: &HashSet<String>,
) -> Option<StagedMatch> {
    if staged.contains(display_name) {
        return Some(StagedMatch::Direct(display_name.to_string()));
    }
    let renamed = disambiguated_name(display_name, file_id);
    if staged.contains(&renamed) {
        return Some(StagedMatch::Renamed(renamed));
    }
    None
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
