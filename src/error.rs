use std::path::PathBuf;
use thiserror::Error;

/// Hard failures. Lookup misses are not errors; they are reported as response text.
#[derive(Error, Debug)]
pub enum Error {
    #[error("State file {} is corrupt: {source}", path.display())]
    CorruptState {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid arguments for {tool}: {source}")]
    InvalidArguments {
        tool: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Shifting task {task_id} by {delay_hours}h overflows its duration")]
    DurationOverflow { task_id: String, delay_hours: i64 },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    /// True for failures caused by the caller's arguments rather than the state file.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::InvalidArguments { .. } | Error::DurationOverflow { .. }
        )
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
