//! CLI-level errors (wraps driver and config errors)

use thiserror::Error;

use crate::config::ConfigError;
use crate::domain::TreeError;
use crate::driver::DriverError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Driver(#[from] DriverError),

    #[error("{0}")]
    Tree(#[from] TreeError),

    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("I/O error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("no node labelled `{0}`")]
    LabelNotFound(String),

    #[error("input is empty")]
    EmptyInput,

    #[error("{0}")]
    NotCanonical(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Create an I/O error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Driver(_) => crate::exitcode::DATAERR,
            CliError::Tree(_) => crate::exitcode::SOFTWARE,
            CliError::Config(_) => crate::exitcode::CONFIG,
            CliError::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound => {
                crate::exitcode::NOINPUT
            }
            CliError::Io { .. } => crate::exitcode::IOERR,
            CliError::LabelNotFound(_) => crate::exitcode::USAGE,
            CliError::EmptyInput | CliError::NotCanonical(_) => crate::exitcode::DATAERR,
        }
    }
}
