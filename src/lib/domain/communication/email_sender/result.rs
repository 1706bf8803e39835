//! Email result

use std::fmt;

use serde::Serialize;

/// The outcome of a single send
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EmailResult {
    recipient: String,
    subject: String,
    message_sent: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<String>,
}

impl EmailResult {
    /// Creates a result. The summary is only populated when there is no error.
    pub fn new(recipient: &str, subject: &str, message_sent: bool, error: Option<String>) -> Self {
        let output = match error {
            Some(_) => None,
            None => {
                let status = if message_sent {
                    "successfully"
                } else {
                    "failed to be"
                };

                Some(format!(
                    "Email to {recipient} with subject '{subject}' was {status} sent."
                ))
            }
        };

        Self {
            recipient: recipient.to_string(),
            subject: subject.to_string(),
            message_sent,
            error,
            output,
        }
    }

    /// A successful send
    pub fn sent(recipient: &str, subject: &str) -> Self {
        Self::new(recipient, subject, true, None)
    }

    /// A failed send
    pub fn failed(recipient: &str, subject: &str, error: impl Into<String>) -> Self {
        Self::new(recipient, subject, false, Some(error.into()))
    }

    /// The primary recipient
    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    /// The subject of the email
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Whether the server accepted the message
    pub fn message_sent(&self) -> bool {
        self.message_sent
    }

    /// What went wrong, if anything
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Human-readable summary, absent when there is an error
    pub fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }
}

impl fmt::Display for EmailResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.error, &self.output) {
            (Some(error), _) => write!(f, "Error: {error}"),
            (None, Some(output)) => write!(f, "{output}"),
            (None, None) => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn test_sent_output() {
        let result = EmailResult::sent("a@x.com", "Hi");

        assert_eq!(
            result.output(),
            Some("Email to a@x.com with subject 'Hi' was successfully sent.")
        );
        assert_eq!(result.to_string(), "Email to a@x.com with subject 'Hi' was successfully sent.");
    }

    #[test]
    fn test_not_sent_without_error() {
        let result = EmailResult::new("a@x.com", "Hi", false, None);

        assert_eq!(
            result.output(),
            Some("Email to a@x.com with subject 'Hi' was failed to be sent.")
        );
    }

    #[test]
    fn test_error_leaves_output_empty() {
        let result = EmailResult::failed("a@x.com", "Hi", "connection refused");

        assert!(!result.message_sent());
        assert_eq!(result.error(), Some("connection refused"));
        assert_eq!(result.output(), None);
        assert_eq!(result.to_string(), "Error: connection refused");
    }

    #[test]
    fn test_serialize_skips_empty_fields() -> TestResult {
        let json = serde_json::to_value(EmailResult::failed("a@x.com", "Hi", "boom"))?;

        assert_eq!(
            json,
            serde_json::json!({
                "recipient": "a@x.com",
                "subject": "Hi",
                "message_sent": false,
                "error": "boom",
            })
        );

        Ok(())
    }
}
