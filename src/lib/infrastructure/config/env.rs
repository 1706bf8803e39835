//! SMTP settings from command-line flags or environment variables

use std::fmt;

use clap::Parser;

use crate::domain::communication::config::{ConfigProvider, EmailSection, Setting};

/// SMTP configuration
#[derive(Clone, Default, Parser)]
pub struct SmtpArgs {
    /// The SMTP host
    #[clap(long, env = "SMTP_SERVER")]
    pub smtp_server: Option<String>,

    /// The SMTP port
    #[clap(long, env = "SMTP_PORT")]
    pub smtp_port: Option<String>,

    /// The SMTP username, also used as the sender address
    #[clap(long, env = "SMTP_USERNAME")]
    pub smtp_username: Option<String>,

    /// The SMTP password
    #[clap(long, env = "SMTP_PASSWORD", hide_env_values = true)]
    pub smtp_password: Option<String>,

    /// Enable STARTTLS (TLS upgrade on connection), defaults to true
    #[clap(long, env = "SMTP_USE_TLS")]
    pub use_tls: Option<String>,
}

impl SmtpArgs {
    fn is_empty(&self) -> bool {
        self.smtp_server.is_none()
            && self.smtp_port.is_none()
            && self.smtp_username.is_none()
            && self.smtp_password.is_none()
            && self.use_tls.is_none()
    }
}

fn parse_port(raw: &str) -> Setting<i64> {
    raw.trim()
        .parse()
        .map_or(Setting::Invalid, Setting::Value)
}

fn parse_flag(raw: &str) -> Setting<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Setting::Value(true),
        "false" | "0" | "no" | "off" => Setting::Value(false),
        _ => Setting::Invalid,
    }
}

impl ConfigProvider for SmtpArgs {
    fn email_section(&self) -> Option<EmailSection> {
        if self.is_empty() {
            return None;
        }

        Some(EmailSection {
            smtp_server: self.smtp_server.clone().into(),
            smtp_port: self
                .smtp_port
                .as_deref()
                .map_or(Setting::Missing, parse_port),
            smtp_username: self.smtp_username.clone().into(),
            smtp_password: self.smtp_password.clone().into(),
            use_tls: self.use_tls.as_deref().map_or(Setting::Missing, parse_flag),
        })
    }
}

impl fmt::Debug for SmtpArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpArgs")
            .field("smtp_server", &self.smtp_server)
            .field("smtp_port", &self.smtp_port)
            .field("smtp_username", &self.smtp_username)
            .field("smtp_password", &self.smtp_password.as_ref().map(|_| "********"))
            .field("use_tls", &self.use_tls)
            .finish()
    }
}
