//! Configuration errors

use thiserror::Error;

/// Errors that can occur when resolving the email configuration
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The `email` section is absent
    #[error("email configuration section not found")]
    Missing,

    /// A field is absent, of the wrong type or out of range
    #[error("missing or invalid `{0}`")]
    Incomplete(&'static str),
}
