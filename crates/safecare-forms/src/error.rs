use thiserror::Error;

use crate::validation::{ShapeError, ValidationError};

#[derive(Debug, Error)]
pub enum FormError {
    #[error("unknown field: {0}")]
    UnknownField(String),

    #[error("field '{0}' is not a repeatable group")]
    NotAGroup(String),

    #[error("field '{0}' does not hold a single value")]
    NotAScalar(String),

    #[error("field '{path}' only accepts a string or null")]
    InvalidValue { path: String },

    #[error("index {index} is out of range for '{group}' ({len} entries)")]
    IndexOutOfRange {
        group: String,
        index: usize,
        len: usize,
    },

    #[error("'{group}' requires at least {min} entries")]
    MinimumEntries { group: String, min: usize },

    #[error("'{group}' allows at most {max} entries")]
    MaximumEntries { group: String, max: usize },

    #[error("'{0}' has no entries to remove")]
    EmptyGroup(String),

    #[error("validation failed with {} error(s)", .0.len())]
    Validation(Vec<ValidationError>),

    #[error(transparent)]
    Shape(#[from] ShapeError),
}
