use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("object not found: {key}")]
    NotFound { key: String },

    #[error("object body is not UTF-8: {key}")]
    InvalidBody { key: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("snapshot I/O error: {0}")]
    Io(#[from] std::io::Error),
}
