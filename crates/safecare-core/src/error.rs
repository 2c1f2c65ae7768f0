use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("unknown form: {0}")]
    UnknownForm(String),

    #[error("expected a JSON object for {0}")]
    NotAnObject(String),
}
