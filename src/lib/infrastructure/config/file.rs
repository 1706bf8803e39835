//! TOML configuration file

use std::{fmt, fs, path::Path, str::FromStr};

use anyhow::{Context, Result};
use toml::{Table, Value};
use tracing::debug;

use crate::domain::communication::config::{ConfigProvider, EmailSection, Setting};

/// The `[email]` table of a TOML configuration file, read once at load time
#[derive(Clone, Default)]
pub struct FileConfig {
    email: Option<Table>,
}

impl FileConfig {
    /// Loads the configuration file at `path`
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;

        let config = contents
            .parse()
            .with_context(|| format!("failed to parse {}", path.display()))?;

        debug!("loaded configuration from {}", path.display());

        Ok(config)
    }
}

impl fmt::Debug for FileConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileConfig")
            .field("email_section", &self.email_section())
            .finish()
    }
}

impl FromStr for FileConfig {
    type Err = toml::de::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut document: Table = s.parse()?;

        let email = document.remove("email").map(|section| match section {
            Value::Table(table) => table,
            _ => Table::new(),
        });

        Ok(Self { email })
    }
}

fn string(table: &Table, key: &str) -> Setting<String> {
    match table.get(key) {
        None => Setting::Missing,
        Some(Value::String(value)) => Setting::Value(value.clone()),
        Some(_) => Setting::Invalid,
    }
}

fn integer(table: &Table, key: &str) -> Setting<i64> {
    match table.get(key) {
        None => Setting::Missing,
        Some(Value::Integer(value)) => Setting::Value(*value),
        Some(_) => Setting::Invalid,
    }
}

fn boolean(table: &Table, key: &str) -> Setting<bool> {
    match table.get(key) {
        None => Setting::Missing,
        Some(Value::Boolean(value)) => Setting::Value(*value),
        Some(_) => Setting::Invalid,
    }
}

impl ConfigProvider for FileConfig {
    fn email_section(&self) -> Option<EmailSection> {
        let table = self.email.as_ref()?;

        Some(EmailSection {
            smtp_server: string(table, "smtp_server"),
            smtp_port: integer(table, "smtp_port"),
            smtp_username: string(table, "smtp_username"),
            smtp_password: string(table, "smtp_password"),
            use_tls: boolean(table, "use_tls"),
        })
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::domain::communication::config::{resolve, ConfigError};

    use super::*;

    const CONFIG: &str = r#"
[llm]
model = "gpt-4o"

[email]
smtp_server = "smtp.example.com"
smtp_port = 587
smtp_username = "your-email@example.com"
smtp_password = "your-password-or-app-password"
use_tls = false
"#;

    #[test]
    fn test_email_section_is_read() -> TestResult {
        let config = resolve(&CONFIG.parse::<FileConfig>()?)?;

        assert_eq!(config.smtp_server, "smtp.example.com");
        assert_eq!(config.smtp_port, 587);
        assert_eq!(config.smtp_username, "your-email@example.com");
        assert_eq!(config.smtp_password, "your-password-or-app-password");
        assert!(!config.use_tls);

        Ok(())
    }

    #[test]
    fn test_missing_email_section() -> TestResult {
        let file: FileConfig = "[llm]\nmodel = \"gpt-4o\"\n".parse()?;

        assert_eq!(resolve(&file), Err(ConfigError::Missing));

        Ok(())
    }

    #[test]
    fn test_port_as_string_is_incomplete() -> TestResult {
        let file: FileConfig = r#"
[email]
smtp_server = "smtp.example.com"
smtp_port = "587"
smtp_username = "a@example.com"
smtp_password = "secret"
"#
        .parse()?;

        assert_eq!(resolve(&file), Err(ConfigError::Incomplete("smtp_port")));

        Ok(())
    }

    #[test]
    fn test_missing_password_is_incomplete() -> TestResult {
        let file: FileConfig = r#"
[email]
smtp_server = "smtp.example.com"
smtp_port = 587
smtp_username = "a@example.com"
"#
        .parse()?;

        assert_eq!(resolve(&file), Err(ConfigError::Incomplete("smtp_password")));

        Ok(())
    }

    #[test]
    fn test_debug_output_redacts_password() -> TestResult {
        let file: FileConfig = CONFIG.parse()?;

        assert!(!format!("{:?}", file).contains("your-password-or-app-password"));

        Ok(())
    }

    #[test]
    fn test_load_missing_file_fails() {
        assert!(FileConfig::load("/nonexistent/config.toml").is_err());
    }

    #[test]
    fn test_load_from_disk() -> TestResult {
        let path = std::env::temp_dir().join(format!("email-sender-{}.toml", std::process::id()));
        fs::write(&path, CONFIG)?;

        let file = FileConfig::load(&path);
        fs::remove_file(&path)?;

        assert!(file?.email_section().is_some());

        Ok(())
    }
}
