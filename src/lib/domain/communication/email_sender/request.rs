//! Send email request

use serde::Deserialize;

/// The arguments of a send
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct SendEmailRequest {
    /// Email address of the recipient
    pub to: String,

    /// Subject line of the email
    pub subject: String,

    /// Content of the email, plain text or HTML
    pub body: String,

    /// CC recipients
    #[serde(default)]
    pub cc: Vec<String>,

    /// BCC recipients, never written to any header
    #[serde(default)]
    pub bcc: Vec<String>,

    /// Whether the body is HTML
    #[serde(default)]
    pub is_html: bool,
}

impl SendEmailRequest {
    /// Creates a plain-text request without copies
    pub fn new(to: impl Into<String>, subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            body: body.into(),
            ..Self::default()
        }
    }

    /// Sets the CC recipients
    pub fn with_cc(mut self, cc: Vec<String>) -> Self {
        self.cc = cc;
        self
    }

    /// Sets the BCC recipients
    pub fn with_bcc(mut self, bcc: Vec<String>) -> Self {
        self.bcc = bcc;
        self
    }

    /// Marks the body as HTML
    pub fn html(mut self, is_html: bool) -> Self {
        self.is_html = is_html;
        self
    }
}
