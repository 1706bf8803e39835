//! Outgoing email: configuration, message building, delivery and reporting.

pub mod config;
pub mod email_sender;
pub mod mailer;
