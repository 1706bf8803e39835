//! Email message

use std::fmt;

/// The content type of the message body
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContentType {
    /// `text/plain`
    Plain,

    /// `text/html`
    Html,
}

impl ContentType {
    /// The MIME type of the body
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Plain => "text/plain",
            Self::Html => "text/html",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain => write!(f, "plain"),
            Self::Html => write!(f, "html"),
        }
    }
}

/// A message ready to be handed to a [`Mailer`](super::Mailer).
///
/// There is no BCC field: blind copies exist only in the [`RecipientSet`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutgoingMessage {
    /// The sender, the SMTP username
    pub from: String,

    /// The primary recipient
    pub to: String,

    /// The subject of the email
    pub subject: String,

    /// Carbon copy recipients, in order
    pub cc: Vec<String>,

    /// The body of the email
    pub content: String,

    /// The content type of the body
    pub content_type: ContentType,
}

impl OutgoingMessage {
    /// Builds a message. Addresses are taken as-is, without validation.
    pub fn build(
        from: &str,
        to: &str,
        subject: &str,
        body: &str,
        cc: &[String],
        is_html: bool,
    ) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            subject: subject.to_string(),
            cc: cc.to_vec(),
            content: body.to_string(),
            content_type: if is_html {
                ContentType::Html
            } else {
                ContentType::Plain
            },
        }
    }

    /// The `Cc` header value, if there are any CC recipients
    pub fn cc_header(&self) -> Option<String> {
        if self.cc.is_empty() {
            None
        } else {
            Some(self.cc.join(", "))
        }
    }

    /// Every header the message carries, in rendering order
    pub fn headers(&self) -> Vec<(&'static str, String)> {
        let mut headers = vec![
            ("From", self.from.clone()),
            ("To", self.to.clone()),
            ("Subject", self.subject.clone()),
        ];

        if let Some(cc) = self.cc_header() {
            headers.push(("Cc", cc));
        }

        headers.push(("Content-Type", self.content_type.mime_type().to_string()));

        headers
    }
}

/// Envelope recipients: `to`, then every CC, then every BCC
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecipientSet(Vec<String>);

impl RecipientSet {
    /// Creates the recipient set for a message
    pub fn new(to: &str, cc: &[String], bcc: &[String]) -> Self {
        let mut recipients = Vec::with_capacity(1 + cc.len() + bcc.len());

        recipients.push(to.to_string());
        recipients.extend_from_slice(cc);
        recipients.extend_from_slice(bcc);

        Self(recipients)
    }

    /// The addresses, in order
    pub fn addresses(&self) -> &[String] {
        &self.0
    }
}

impl From<RecipientSet> for Vec<String> {
    fn from(recipients: RecipientSet) -> Self {
        recipients.0
    }
}
