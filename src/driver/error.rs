//! Driver-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::TreeError;

/// Driver errors wrap node model errors and add label-construction failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DriverError {
    #[error("{0}")]
    Tree(#[from] TreeError),

    #[error("invalid label `{label}`: {message}")]
    InvalidLabel { label: String, message: String },
}

/// Result type for driver operations.
pub type DriverResult<T> = Result<T, DriverError>;
