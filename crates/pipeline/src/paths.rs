use std::path::{Component, Path, PathBuf};

use vlex_core::error::CoreError;
use vlex_core::naming::COPY_REPORT_FILE_NAME;

/// File-system locations shared by both stages.
#[derive(Debug, Clone)]
pub struct StagePaths {
    /// Read-only legacy tree, one folder per legacy `"Folder"` value.
    pub legacy_root: PathBuf,
    /// Read/write staging directory populated by the copy stage.
    pub staging_dir: PathBuf,
    /// Where the import stage writes its report.
    pub import_report_path: PathBuf,
}

impl StagePaths {
    /// Location of the copy-stage report inside the staging directory.
    pub fn copy_report_path(&self) -> PathBuf {
        self.staging_dir.join(COPY_REPORT_FILE_NAME)
    }

    /// Expected source of a legacy file: `<legacy-root>/<folder>/<name>`.
    ///
    /// Leading separators in the folder are dropped. Any other component
    /// that is not a plain name (`..`, `.`, a drive prefix) is rejected, so
    /// the result always lies under the legacy root.
    pub fn legacy_source(
        &self,
        folder: Option<&str>,
        file_name: &str,
    ) -> Result<PathBuf, CoreError> {
        let folder = folder.unwrap_or("").trim_start_matches(['/', '\\']);
        let mut path = self.legacy_root.clone();
        if !folder.is_empty() {
            let contained = Path::new(folder)
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
            if !contained {
                return Err(CoreError::Validation(format!(
                    "Folder '{folder}' points outside the legacy root"
                )));
            }
            path.push(folder);
        }
        path.push(file_name);
        Ok(path)
    }

    /// Label used in skip reasons and log lines.
    pub fn staging_label(&self) -> String {
        self.staging_dir.display().to_string()
    }
}
