//! Staging directory operations.
//!
//! Files are only ever created in the staging directory, never replaced:
//! every copy opens its destination with create-new semantics, so a name
//! collision shows up as `AlreadyExists` instead of an overwrite.

use std::collections::HashSet;
use std::io::{self, ErrorKind};
use std::path::Path;

use serde::Serialize;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use vlex_core::naming::{disambiguated_name, COPY_REPORT_FILE_NAME};
use vlex_core::types::DbId;

use crate::error::PipelineError;

/// Where a legacy file ended up in the staging directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedCopy {
    pub stored_name: String,
    pub renamed: bool,
    pub bytes: u64,
}

/// Create the staging directory if it does not exist yet.
pub async fn ensure_dir(dir: &Path) -> Result<(), PipelineError> {
    fs::create_dir_all(dir)
        .await
        .map_err(|e| PipelineError::io(dir, e))
}

/// Copy `source` into `staging_dir` under `file_name`, or under
/// `<stem>_<file_id><ext>` when `file_name` is already taken.
///
/// The report file name is reserved and always treated as taken. Fails
/// with `AlreadyExists` when the disambiguated name is taken too.
pub async fn stage_file(
    source: &Path,
    staging_dir: &Path,
    file_name: &str,
    file_id: DbId,
) -> io::Result<StagedCopy> {
    if file_name != COPY_REPORT_FILE_NAME {
        match copy_new(source, &staging_dir.join(file_name)).await {
            Ok(bytes) => {
                return Ok(StagedCopy {
                    stored_name: file_name.to_string(),
                    renamed: false,
                    bytes,
                })
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {}
            Err(e) => return Err(e),
        }
    }

    let renamed = disambiguated_name(file_name, file_id);
    let destination = staging_dir.join(&renamed);
    match copy_new(source, &destination).await {
        Ok(bytes) => Ok(StagedCopy {
            stored_name: renamed,
            renamed: true,
            bytes,
        }),
        Err(e) if e.kind() == ErrorKind::AlreadyExists => Err(io::Error::new(
            ErrorKind::AlreadyExists,
            format!("destination already exists: {}", destination.display()),
        )),
        Err(e) => Err(e),
    }
}

/// Copy bytes verbatim into a destination that must not exist yet.
///
/// The source is opened first so an unreadable source never leaves an
/// empty destination behind. A destination created by this call is
/// removed again if the copy fails part-way.
async fn copy_new(source: &Path, destination: &Path) -> io::Result<u64> {
    let mut reader = fs::File::open(source).await?;
    let mut writer = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(destination)
        .await?;

    let copied = async {
        let bytes = tokio::io::copy(&mut reader, &mut writer).await?;
        writer.flush().await?;
        Ok::<_, io::Error>(bytes)
    }
    .await;

    if copied.is_err() {
        drop(writer);
        if let Err(e) = fs::remove_file(destination).await {
            tracing::warn!(path = %destination.display(), error = %e, "Failed to remove partial copy");
        }
    }
    copied
}

/// Names of the regular files in the staging directory, excluding the
/// copy-stage report.
pub async fn list_staged_names(staging_dir: &Path) -> Result<HashSet<String>, PipelineError> {
    let mut entries = fs::read_dir(staging_dir)
        .await
        .map_err(|e| PipelineError::io(staging_dir, e))?;

    let mut names = HashSet::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| PipelineError::io(staging_dir, e))?
    {
        let file_type = entry
            .file_type()
            .await
            .map_err(|e| PipelineError::io(entry.path(), e))?;
        if !file_type.is_file() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) if name != COPY_REPORT_FILE_NAME => {
                names.insert(name);
            }
            Ok(_) => {}
            Err(raw) => {
                tracing::warn!(name = ?raw, "Ignoring staged file with a non UTF-8 name");
            }
        }
    }
    Ok(names)
}

/// Write a report as pretty-printed JSON, replacing any previous report.
pub async fn write_report<T: Serialize>(path: &Path, report: &T) -> Result<(), PipelineError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent).await?;
    }
    let body = serde_json::to_vec_pretty(report)?;
    fs::write(path, body)
        .await
        .map_err(|e| PipelineError::io(path, e))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
