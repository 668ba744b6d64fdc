//! Submission settings.

use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

/// How long the confirmation stays up before the form resets.
pub const DEFAULT_RESET_DELAY: Duration = Duration::from_millis(3000);

/// Where and how applications are submitted.
///
/// The request has no timeout unless one is set; the platform default
/// applies.
///
/// # Example
///
/// ```rust
/// use credit_intake::SubmitConfig;
/// use std::time::Duration;
///
/// let config = SubmitConfig::from_toml_str(r#"
///     endpoint = "https://loans.example.test/applications"
///     reset_delay_ms = 1500
/// "#).unwrap();
///
/// assert_eq!(config.reset_delay(), Duration::from_millis(1500));
/// assert_eq!(config.timeout(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitConfig {
    endpoint: String,
    reset_delay: Duration,
    timeout: Option<Duration>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    endpoint: String,
    #[serde(default)]
    reset_delay_ms: Option<u64>,
    #[serde(default)]
    timeout_secs: Option<u64>,
}

impl SubmitConfig {
    /// Creates a config posting to `endpoint` with default settings.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, ConfigError> {
        let endpoint = endpoint.into();
        validate_endpoint(&endpoint)?;
        Ok(Self {
            endpoint,
            reset_delay: DEFAULT_RESET_DELAY,
            timeout: None,
        })
    }

    /// Parses a TOML document with `endpoint`, optional `reset_delay_ms`,
    /// and optional `timeout_secs`.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(source)?;
        let mut config = Self::new(raw.endpoint)?;
        if let Some(ms) = raw.reset_delay_ms {
            config = config.with_reset_delay(Duration::from_millis(ms));
        }
        if let Some(secs) = raw.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        Ok(config)
    }

    /// Sets the delay between a successful submission and the form reset.
    pub fn with_reset_delay(mut self, delay: Duration) -> Self {
        self.reset_delay = delay;
        self
    }

    /// Sets a request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// The URL applications are POSTed to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn reset_delay(&self) -> Duration {
        self.reset_delay
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

fn validate_endpoint(endpoint: &str) -> Result<(), ConfigError> {
    let rest = endpoint
        .strip_prefix("https://")
        .or_else(|| endpoint.strip_prefix("http://"));

    match rest {
        Some(host) if !host.is_empty() && !host.starts_with('/') => Ok(()),
        _ => Err(ConfigError::InvalidEndpoint(endpoint.to_string())),
    }
}
