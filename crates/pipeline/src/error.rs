use std::path::PathBuf;

/// Fatal errors that abort a stage.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// A bulk query or verification read failed.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The staging directory or a report file could not be accessed.
    #[error("I/O error at {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl PipelineError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
