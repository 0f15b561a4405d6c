use thiserror::Error;

#[derive(Error, Debug)]
pub enum RetentionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Schema version mismatch: found {found:?}, expected {expected}")]
    VersionMismatch { found: Option<u64>, expected: u32 },

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

pub type Result<T> = std::result::Result<T, RetentionError>;
