//! Email configuration resolution

use std::fmt;

#[cfg(test)]
use mockall::mock;
use tracing::error;

mod errors;

pub use errors::ConfigError;

/// A single configuration value as supplied by a [`ConfigProvider`]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Setting<T> {
    /// The key is absent
    #[default]
    Missing,

    /// The key is present but its value has the wrong type or cannot be parsed
    Invalid,

    /// The key is present with a usable value
    Value(T),
}

impl<T> Setting<T> {
    fn required(self, field: &'static str) -> Result<T, ConfigError> {
        match self {
            Setting::Value(value) => Ok(value),
            Setting::Missing | Setting::Invalid => Err(ConfigError::Incomplete(field)),
        }
    }
}

impl<T> From<Option<T>> for Setting<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Setting::Missing, Setting::Value)
    }
}

/// The raw `email` configuration section, before validation
#[derive(Clone, Default, PartialEq, Eq)]
pub struct EmailSection {
    /// SMTP server host
    pub smtp_server: Setting<String>,

    /// SMTP server port
    pub smtp_port: Setting<i64>,

    /// SMTP login, also used as the sender address
    pub smtp_username: Setting<String>,

    /// SMTP password
    pub smtp_password: Setting<String>,

    /// Whether to upgrade the connection with STARTTLS
    pub use_tls: Setting<bool>,
}

impl fmt::Debug for EmailSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let password = match self.smtp_password {
            Setting::Missing => "Missing",
            Setting::Invalid => "Invalid",
            Setting::Value(_) => "********",
        };

        f.debug_struct("EmailSection")
            .field("smtp_server", &self.smtp_server)
            .field("smtp_port", &self.smtp_port)
            .field("smtp_username", &self.smtp_username)
            .field("smtp_password", &password)
            .field("use_tls", &self.use_tls)
            .finish()
    }
}

/// Validated SMTP settings for a single send
#[derive(Clone, PartialEq, Eq)]
pub struct EmailConfig {
    /// SMTP server host
    pub smtp_server: String,

    /// SMTP server port
    pub smtp_port: u16,

    /// SMTP login, also used as the sender address
    pub smtp_username: String,

    /// SMTP password, never logged
    pub smtp_password: String,

    /// Whether to upgrade the connection with STARTTLS
    pub use_tls: bool,
}

impl fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailConfig")
            .field("smtp_server", &self.smtp_server)
            .field("smtp_port", &self.smtp_port)
            .field("smtp_username", &self.smtp_username)
            .field("smtp_password", &"********")
            .field("use_tls", &self.use_tls)
            .finish()
    }
}

impl TryFrom<EmailSection> for EmailConfig {
    type Error = ConfigError;

    fn try_from(section: EmailSection) -> Result<Self, Self::Error> {
        let smtp_server = section.smtp_server.required("smtp_server")?;

        let smtp_port = u16::try_from(section.smtp_port.required("smtp_port")?)
            .ok()
            .filter(|port| *port != 0)
            .ok_or(ConfigError::Incomplete("smtp_port"))?;

        let smtp_username = section.smtp_username.required("smtp_username")?;
        let smtp_password = section.smtp_password.required("smtp_password")?;

        let use_tls = match section.use_tls {
            Setting::Missing => true,
            Setting::Invalid => return Err(ConfigError::Incomplete("use_tls")),
            Setting::Value(use_tls) => use_tls,
        };

        Ok(Self {
            smtp_server,
            smtp_port,
            smtp_username,
            smtp_password,
            use_tls,
        })
    }
}

/// Source of the `email` configuration section
pub trait ConfigProvider: Send + Sync + 'static {
    /// Returns the `email` section, or [`None`] if the source has no such section.
    fn email_section(&self) -> Option<EmailSection>;
}

#[cfg(test)]
mock! {
    pub ConfigProvider {}

    impl ConfigProvider for ConfigProvider {
        fn email_section(&self) -> Option<EmailSection>;
    }
}

/// Resolves a fresh [`EmailConfig`] from the provider.
///
/// # Returns
/// - [`Ok`] with the validated configuration. `use_tls` defaults to `true`.
/// - [`Err`] with [`ConfigError::Missing`] when there is no `email` section, or
///   [`ConfigError::Incomplete`] naming the first unusable field.
pub fn resolve<P>(provider: &P) -> Result<EmailConfig, ConfigError>
where
    P: ConfigProvider + ?Sized,
{
    let Some(section) = provider.email_section() else {
        error!("Email configuration not found");

        return Err(ConfigError::Missing);
    };

    EmailConfig::try_from(section).map_err(|err| {
        error!("Email configuration is incomplete: {}", err);

        err
    })
}

#[cfg(test)]
pub(crate) fn test_section() -> EmailSection {
    EmailSection {
        smtp_server: Setting::Value("smtp.example.com".to_string()),
        smtp_port: Setting::Value(587),
        smtp_username: Setting::Value("sender@example.com".to_string()),
        smtp_password: Setting::Value("hunter2".to_string()),
        use_tls: Setting::Missing,
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn provider(section: Option<EmailSection>) -> MockConfigProvider {
        let mut provider = MockConfigProvider::new();

        provider
            .expect_email_section()
            .times(1)
            .returning(move || section.clone());

        provider
    }

    #[test]
    fn test_resolve_complete_section() -> TestResult {
        let config = resolve(&provider(Some(test_section())))?;

        assert_eq!(config.smtp_server, "smtp.example.com");
        assert_eq!(config.smtp_port, 587);
        assert_eq!(config.smtp_username, "sender@example.com");
        assert_eq!(config.smtp_password, "hunter2");

        Ok(())
    }

    #[test]
    fn test_use_tls_defaults_to_true() -> TestResult {
        let config = resolve(&provider(Some(test_section())))?;

        assert!(config.use_tls);

        Ok(())
    }

    #[test]
    fn test_use_tls_can_be_disabled() -> TestResult {
        let section = EmailSection {
            use_tls: Setting::Value(false),
            ..test_section()
        };

        let config = resolve(&provider(Some(section)))?;

        assert!(!config.use_tls);

        Ok(())
    }

    #[test]
    fn test_missing_section() {
        let result = resolve(&provider(None));

        assert_eq!(result, Err(ConfigError::Missing));
    }

    #[test]
    fn test_each_missing_required_field_is_incomplete() {
        let cases: [(&'static str, fn(&mut EmailSection)); 4] = [
            ("smtp_server", |s| s.smtp_server = Setting::Missing),
            ("smtp_port", |s| s.smtp_port = Setting::Missing),
            ("smtp_username", |s| s.smtp_username = Setting::Missing),
            ("smtp_password", |s| s.smtp_password = Setting::Missing),
        ];

        for (field, clear) in cases {
            let mut section = test_section();
            clear(&mut section);

            let result = resolve(&provider(Some(section)));

            assert_eq!(result, Err(ConfigError::Incomplete(field)));
        }
    }

    #[test]
    fn test_wrong_typed_values_are_incomplete() {
        let section = EmailSection {
            smtp_port: Setting::Invalid,
            ..test_section()
        };
        assert_eq!(
            resolve(&provider(Some(section))),
            Err(ConfigError::Incomplete("smtp_port"))
        );

        let section = EmailSection {
            use_tls: Setting::Invalid,
            ..test_section()
        };
        assert_eq!(
            resolve(&provider(Some(section))),
            Err(ConfigError::Incomplete("use_tls"))
        );
    }

    #[test]
    fn test_port_out_of_range_is_incomplete() {
        for port in [0, -25, 65536] {
            let section = EmailSection {
                smtp_port: Setting::Value(port),
                ..test_section()
            };

            assert_eq!(
                resolve(&provider(Some(section))),
                Err(ConfigError::Incomplete("smtp_port"))
            );
        }
    }

    #[test]
    fn test_debug_output_redacts_password() -> TestResult {
        let config = EmailConfig::try_from(test_section())?;

        assert!(!format!("{:?}", config).contains("hunter2"));
        assert!(!format!("{:?}", test_section()).contains("hunter2"));

        Ok(())
    }
}
