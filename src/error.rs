//! Error types for credential rotation.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Result type alias using [`RotateError`].
pub type Result<T> = std::result::Result<T, RotateError>;

/// Everything that can abort a rotation.
///
/// None of these are recovered from locally. Each one ends the rotation at the
/// step where it occurred and leaves the credentials file as it was.
#[derive(Debug, Error)]
pub enum RotateError {
    /// Credentials file is missing or could not be parsed.
    #[error("failed to load credentials file {}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: ini::Error,
    },

    /// No home directory to derive default file locations from.
    #[error("could not determine home directory; set HOME or pass --credentials-file")]
    HomeDirectory,

    /// Long-term section lacks an access key id or secret access key.
    #[error("couldn't find key id or secret access key in [{section}]")]
    MissingCredential { section: String },

    /// MFA code has the wrong shape.
    #[error("MFA code must be {expected} digits, got {actual:?}")]
    InvalidMfaCode { expected: usize, actual: String },

    /// Reading the MFA code from the operator failed.
    #[error("failed to read MFA code")]
    Prompt(#[source] io::Error),

    /// Token exchange call failed.
    #[error("{operation} failed: {message}")]
    Network {
        operation: &'static str,
        message: String,
    },

    /// Credentials file could not be written back.
    #[error("failed to update credentials file {}", .path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl RotateError {
    /// Creates a network error for the given STS operation.
    pub fn network(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Network {
            operation,
            message: message.into(),
        }
    }
}
