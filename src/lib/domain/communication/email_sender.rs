//! Email sender service

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{debug, error};

use crate::domain::communication::{
    config::{self, ConfigProvider},
    mailer::{dispatch, Mailer, OutgoingMessage, RecipientSet},
};

mod request;
mod result;

pub use request::SendEmailRequest;
pub use result::EmailResult;

/// Email sender service
#[async_trait]
pub trait EmailSenderService: Send + Sync + 'static {
    /// Builds and sends an email.
    ///
    /// # Arguments
    /// * `request` - The [`SendEmailRequest`] describing the email.
    ///
    /// # Returns
    /// An [`EmailResult`]. Failures of any kind are reported in the result, never raised.
    ///
    /// # Panics
    /// Must be awaited from within a Tokio runtime: the send runs on a spawned task.
    async fn execute(&self, request: &SendEmailRequest) -> EmailResult;
}

/// Email sender service implementation
pub struct EmailSenderServiceImpl<C, M>
where
    C: ConfigProvider,
    M: Mailer,
{
    config: Arc<C>,
    mailer: Arc<M>,
}

impl<C, M> EmailSenderServiceImpl<C, M>
where
    C: ConfigProvider,
    M: Mailer,
{
    /// The tool name
    pub const NAME: &'static str = "email_sender";

    /// The tool description
    pub const DESCRIPTION: &'static str = "Send an email to a specified recipient with a custom subject and message. \
        Email configuration must be set up in the application config.";

    /// Creates a new email sender service.
    pub fn new(config: Arc<C>, mailer: Arc<M>) -> Self {
        Self { config, mailer }
    }

    /// JSON schema of the arguments accepted by [`Self::execute_json`]
    pub fn parameters() -> Value {
        json!({
            "type": "object",
            "properties": {
                "to": {
                    "type": "string",
                    "description": "(required) Email address of the recipient.",
                },
                "subject": {
                    "type": "string",
                    "description": "(required) Subject line of the email.",
                },
                "body": {
                    "type": "string",
                    "description": "(required) Content of the email. Can be plain text or HTML.",
                },
                "cc": {
                    "type": "array",
                    "items": {"type": "string"},
                    "description": "(optional) CC recipients email addresses.",
                },
                "bcc": {
                    "type": "array",
                    "items": {"type": "string"},
                    "description": "(optional) BCC recipients email addresses.",
                },
                "is_html": {
                    "type": "boolean",
                    "description": "(optional) Whether the body is HTML. Default is false.",
                    "default": false,
                },
            },
            "required": ["to", "subject", "body"],
        })
    }

    /// Sends an email described by JSON arguments.
    ///
    /// Arguments that do not match [`Self::parameters`] produce a failed [`EmailResult`].
    pub async fn execute_json(&self, args: Value) -> EmailResult {
        let field = |name: &str| {
            args.get(name)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        let (to, subject) = (field("to"), field("subject"));

        match serde_json::from_value::<SendEmailRequest>(args) {
            Ok(request) => self.execute(&request).await,
            Err(e) => {
                error!("Invalid email arguments: {}", e);

                EmailResult::failed(&to, &subject, format!("Invalid arguments: {}", e))
            }
        }
    }
}

#[async_trait]
impl<C, M> EmailSenderService for EmailSenderServiceImpl<C, M>
where
    C: ConfigProvider,
    M: Mailer,
{
    async fn execute(&self, request: &SendEmailRequest) -> EmailResult {
        let config = match config::resolve(self.config.as_ref()) {
            Ok(config) => config,
            Err(e) => {
                return EmailResult::failed(
                    &request.to,
                    &request.subject,
                    format!("Email configuration is missing or incomplete: {}", e),
                );
            }
        };

        let message = OutgoingMessage::build(
            &config.smtp_username,
            &request.to,
            &request.subject,
            &request.body,
            &request.cc,
            request.is_html,
        );
        let recipients = RecipientSet::new(&request.to, &request.cc, &request.bcc);

        debug!(
            "Sending {} email to {} recipient(s)",
            message.content_type,
            recipients.addresses().len()
        );

        let mailer = Arc::clone(&self.mailer);

        let send = tokio::spawn(async move {
            dispatch(mailer.as_ref(), &config, &message, &recipients).await
        });

        match send.await {
            Ok(result) => result,
            Err(e) => {
                error!("Failed to send email: {}", e);

                EmailResult::failed(
                    &request.to,
                    &request.subject,
                    format!("Failed to send email: {}", e),
                )
            }
        }
    }
}

impl<C, M> Clone for EmailSenderServiceImpl<C, M>
where
    C: ConfigProvider,
    M: Mailer,
{
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            mailer: Arc::clone(&self.mailer),
        }
    }
}

impl<C, M> fmt::Debug for EmailSenderServiceImpl<C, M>
where
    C: ConfigProvider,
    M: Mailer,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailSenderServiceImpl")
            .field("config", &"ConfigProvider")
            .field("mailer", &"Mailer")
            .finish()
    }
}
