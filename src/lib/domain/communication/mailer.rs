//! Mailer module

use async_trait::async_trait;
use tracing::{error, info};

#[cfg(test)]
use mockall::mock;

use crate::domain::communication::{config::EmailConfig, email_sender::EmailResult};

mod errors;
mod message;

pub use errors::MailerError;
pub use message::{ContentType, OutgoingMessage, RecipientSet};

/// Email transport
#[async_trait]
pub trait Mailer: Send + Sync + 'static {
    /// Deliver a message
    ///
    /// # Arguments
    /// * `config` - The SMTP settings to connect with.
    /// * `message` - The [`OutgoingMessage`] to deliver.
    /// * `recipients` - Every envelope recipient, including BCC.
    ///
    /// # Returns
    /// A [`Result`] indicating success or failure.
    async fn send(
        &self,
        config: &EmailConfig,
        message: &OutgoingMessage,
        recipients: &RecipientSet,
    ) -> Result<(), MailerError>;
}

#[cfg(test)]
mock! {
    pub Mailer {}

    #[async_trait]
    impl Mailer for Mailer {
        async fn send(
            &self,
            config: &EmailConfig,
            message: &OutgoingMessage,
            recipients: &RecipientSet,
        ) -> Result<(), MailerError>;
    }
}

/// Sends the message with `mailer` and reports the outcome as an [`EmailResult`].
pub async fn dispatch<M>(
    mailer: &M,
    config: &EmailConfig,
    message: &OutgoingMessage,
    recipients: &RecipientSet,
) -> EmailResult
where
    M: Mailer + ?Sized,
{
    match mailer.send(config, message, recipients).await {
        Ok(()) => {
            info!(
                "Email sent successfully to {} with subject '{}'",
                message.to, message.subject
            );

            EmailResult::sent(&message.to, &message.subject)
        }
        Err(e) => {
            error!("Error sending email: {}", e);

            EmailResult::failed(
                &message.to,
                &message.subject,
                format!("Error sending email: {}", e),
            )
        }
    }
}
