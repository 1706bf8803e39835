//! Mailer errors

use thiserror::Error;

/// Errors that can occur while delivering an email
#[derive(Debug, Error)]
pub enum MailerError {
    /// The SMTP server could not be reached
    #[error("could not connect to the SMTP server: {0}")]
    Connection(String),

    /// The STARTTLS upgrade failed
    #[error("TLS negotiation failed: {0}")]
    TlsNegotiation(String),

    /// The server rejected the credentials
    #[error("authentication rejected: {0}")]
    Authentication(String),

    /// The server rejected a recipient or the message
    #[error("delivery rejected: {0}")]
    Delivery(String),

    /// An address could not be parsed
    #[error("invalid email address `{0}`")]
    InvalidAddress(String),

    /// Unknown error
    #[error(transparent)]
    Unexpected(anyhow::Error),
}

impl From<anyhow::Error> for MailerError {
    fn from(err: anyhow::Error) -> Self {
        MailerError::Unexpected(err)
    }
}
