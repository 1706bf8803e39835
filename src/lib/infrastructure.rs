//! Adapters for configuration sources and SMTP delivery

pub mod config;
pub mod email;
