//! SMTP email service implementation

use std::fmt::Display;

use anyhow::anyhow;
use async_trait::async_trait;
use lettre::{
    address::Envelope,
    message::{header, Mailbox},
    transport::smtp::{
        authentication::{Credentials, DEFAULT_MECHANISMS},
        client::{SmtpConnection, TlsParameters},
        extension::ClientId,
    },
    Address, Message,
};
use tracing::{debug, warn};

use crate::domain::communication::{
    config::EmailConfig,
    mailer::{ContentType, Mailer, MailerError, OutgoingMessage, RecipientSet},
};

const REDACTED: &str = "********";

/// SMTP mailer
#[derive(Debug, Default, Clone)]
pub struct SmtpMailer {
    hello_name: ClientId,
}

impl SmtpMailer {
    /// Create a new SMTP mailer that greets the server with the local hostname
    pub fn new() -> Self {
        Self::default()
    }

    /// Greet the server with `domain` instead of the local hostname
    pub fn with_hello_name(domain: impl Into<String>) -> Self {
        Self {
            hello_name: ClientId::Domain(domain.into()),
        }
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(
        &self,
        config: &EmailConfig,
        message: &OutgoingMessage,
        recipients: &RecipientSet,
    ) -> Result<(), MailerError> {
        let (envelope, email) = render(message, recipients)?;

        let config = config.clone();
        let hello_name = self.hello_name.clone();

        tokio::task::spawn_blocking(move || deliver(&config, &hello_name, &envelope, &email))
            .await
            .map_err(|e| MailerError::Unexpected(anyhow!("SMTP worker failed: {}", e)))?
    }
}

fn mailbox(raw: &str) -> Result<Mailbox, MailerError> {
    raw.parse()
        .map_err(|_| MailerError::InvalidAddress(raw.to_string()))
}

/// The bare address of a mailbox, accepting the `Name <addr>` form
fn address(raw: &str) -> Result<Address, MailerError> {
    mailbox(raw).map(|mailbox| mailbox.email)
}

/// Renders the wire form of the message and its envelope
fn render(
    message: &OutgoingMessage,
    recipients: &RecipientSet,
) -> Result<(Envelope, Vec<u8>), MailerError> {
    let mut builder = Message::builder()
        .from(mailbox(&message.from)?)
        .to(mailbox(&message.to)?)
        .subject(message.subject.clone());

    for cc in &message.cc {
        builder = builder.cc(mailbox(cc)?);
    }

    let content_type = match message.content_type {
        ContentType::Plain => header::ContentType::TEXT_PLAIN,
        ContentType::Html => header::ContentType::TEXT_HTML,
    };

    let email = builder
        .header(content_type)
        .body(message.content.clone())
        .map_err(|e| MailerError::Unexpected(anyhow!("could not build message: {}", e)))?;

    let to = recipients
        .addresses()
        .iter()
        .map(|recipient| address(recipient))
        .collect::<Result<Vec<_>, _>>()?;

    let envelope = Envelope::new(Some(address(&message.from)?), to)
        .map_err(|e| MailerError::Unexpected(anyhow!("could not build envelope: {}", e)))?;

    Ok((envelope, email.formatted()))
}

/// Removes every occurrence of the password from an error message
fn redact(err: impl Display, password: &str) -> String {
    let message = err.to_string();

    if password.is_empty() {
        message
    } else {
        message.replace(password, REDACTED)
    }
}

/// An open SMTP connection that is closed when dropped
struct Session {
    connection: SmtpConnection,
    quit: bool,
}

impl Session {
    fn open(config: &EmailConfig, hello_name: &ClientId) -> Result<Self, MailerError> {
        debug!(
            "connecting to {}:{}",
            config.smtp_server, config.smtp_port
        );

        let connection = SmtpConnection::connect(
            (config.smtp_server.as_str(), config.smtp_port),
            None,
            hello_name,
            None,
            None,
        )
        .map_err(|e| MailerError::Connection(redact(e, &config.smtp_password)))?;

        Ok(Self {
            connection,
            quit: false,
        })
    }

    fn quit(mut self) {
        self.quit = true;

        if let Err(e) = self.connection.quit() {
            warn!("SMTP server did not acknowledge QUIT: {}", e);
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if !self.quit {
            self.connection.abort();
        }
    }
}

/// Runs a complete SMTP session. Blocks the calling thread.
fn deliver(
    config: &EmailConfig,
    hello_name: &ClientId,
    envelope: &Envelope,
    email: &[u8],
) -> Result<(), MailerError> {
    let password = config.smtp_password.as_str();

    let mut session = Session::open(config, hello_name)?;

    if config.use_tls {
        let parameters = TlsParameters::new(config.smtp_server.clone())
            .map_err(|e| MailerError::TlsNegotiation(redact(e, password)))?;

        session
            .connection
            .starttls(&parameters, hello_name)
            .map_err(|e| MailerError::TlsNegotiation(redact(e, password)))?;

        debug!("connection upgraded with STARTTLS");
    }

    let credentials = Credentials::new(config.smtp_username.clone(), config.smtp_password.clone());

    session
        .connection
        .auth(DEFAULT_MECHANISMS, &credentials)
        .map_err(|e| MailerError::Authentication(redact(e, password)))?;

    debug!("authenticated as {}", config.smtp_username);

    session
        .connection
        .send(envelope, email)
        .map_err(|e| MailerError::Delivery(redact(e, password)))?;

    session.quit();

    Ok(())
}
