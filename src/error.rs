//! Error types shared by the scheduler, the session queue and the stores.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StudyError {
    /// Grade outside the closed set {0, 2, 4, 5}
    #[error("invalid rating {0}: expected one of 0, 2, 4, 5")]
    InvalidRating(u8),

    /// Session operation called in the wrong state
    #[error("protocol violation: {0}")]
    ProtocolViolation(String),

    /// Review store failed a read or a write
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("catalog error: {0}")]
    Catalog(String),

    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, StudyError>;

impl From<rusqlite::Error> for StudyError {
    fn from(err: rusqlite::Error) -> Self {
        StudyError::StorageUnavailable(err.to_string())
    }
}

impl From<serde_json::Error> for StudyError {
    fn from(err: serde_json::Error) -> Self {
        StudyError::Catalog(err.to_string())
    }
}
