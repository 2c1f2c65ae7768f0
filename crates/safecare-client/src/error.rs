use thiserror::Error;

use safecare_forms::error::FormError;
use safecare_forms::validation::{ShapeError, ValidationError};

/// Shown for every fetch or submit failure the user cannot fix inline.
pub const GENERIC_ERROR: &str = "Something went wrong! Please try again later";

pub const SIGN_IN_REQUIRED: &str = "Please sign in to continue";

#[derive(Debug, Error)]
pub enum ClientError {
    /// No session, or the backend rejected the token.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("not found: {0}")]
    NotFound(String),

    #[error("server returned {status}: {message}")]
    Server { status: u16, message: String },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error(transparent)]
    Shape(#[from] ShapeError),

    /// Client-side validation failed; nothing was sent.
    #[error("validation failed with {} error(s)", .0.len())]
    Validation(Vec<ValidationError>),

    #[error(transparent)]
    Form(FormError),

    #[error("session file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<FormError> for ClientError {
    fn from(e: FormError) -> Self {
        match e {
            FormError::Validation(errors) => ClientError::Validation(errors),
            FormError::Shape(e) => ClientError::Shape(e),
            other => ClientError::Form(other),
        }
    }
}

impl ClientError {
    /// The notice to show for this error. Validation errors have none: they
    /// are rendered next to their fields instead.
    pub fn user_message(&self) -> Option<&'static str> {
        match self {
            ClientError::Validation(_) => None,
            ClientError::Unauthorized(_) => Some(SIGN_IN_REQUIRED),
            _ => Some(GENERIC_ERROR),
        }
    }

    pub fn requires_sign_in(&self) -> bool {
        matches!(self, ClientError::Unauthorized(_))
    }
}
