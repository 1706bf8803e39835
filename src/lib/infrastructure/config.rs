//! Configuration providers

pub mod env;
pub mod file;
