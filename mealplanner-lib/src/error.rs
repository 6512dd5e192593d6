use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while talking to the backend or preparing a request.
///
/// The variant only matters to logging and exit codes. Users are shown a single message
/// regardless of kind, see [`RecordStore`](crate::store::RecordStore).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The request could not be sent, or the response could not be read.
    #[error("Transport error: {0}")]
    Transport(String),
    /// The backend answered with `success: false`.
    #[error("Backend error: {}", .message.as_deref().unwrap_or("no message given"))]
    Api { message: Option<String> },
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Date and weight are required fields")]
    MissingRequired,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("$HOME must be set to locate the configuration directory")]
    NoHome,
    #[error("Failed to access {path}: {reason}")]
    Io { path: PathBuf, reason: String },
    #[error("Failed to serialize configuration: {0}")]
    Serialize(String),
}

impl ConfigError {
    pub(crate) fn io(path: &std::path::Path, err: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            reason: err.to_string(),
        }
    }
}
