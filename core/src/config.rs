//! Client-wide configuration.
//!
//! A `ClientConfig` is assembled once, handed to [`ApiClient`](crate::ApiClient)
//! by value and never mutated afterwards. Every resource module built from the
//! same client sees the same credentials, endpoint, timeout and strictness.

use std::env;
use std::fmt;
use std::time::Duration;

use crate::error::ConfigError;

/// Production API host. `/v1` is appended by the client.
pub const DEFAULT_ENDPOINT: &str = "https://api.voucherify.io";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(180);

#[derive(Clone)]
pub struct ClientConfig {
    pub application_id: String,
    pub client_secret_key: String,
    /// Overrides [`DEFAULT_ENDPOINT`], e.g. for a regional cluster.
    pub api_endpoint: Option<String>,
    pub timeout: Duration,
    /// Raise on failed calls instead of returning the error body.
    pub strict: bool,
}

impl ClientConfig {
    pub fn new(application_id: impl Into<String>, client_secret_key: impl Into<String>) -> Self {
        Self {
            application_id: application_id.into(),
            client_secret_key: client_secret_key.into(),
            api_endpoint: None,
            timeout: DEFAULT_TIMEOUT,
            strict: false,
        }
    }

    pub fn with_api_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.api_endpoint = Some(endpoint.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Build a configuration from `VOUCHERIFY_*` environment variables.
    ///
    /// `VOUCHERIFY_APP_ID` and `VOUCHERIFY_SECRET_KEY` are required;
    /// `VOUCHERIFY_API_ENDPOINT`, `VOUCHERIFY_TIMEOUT_MS` and
    /// `VOUCHERIFY_STRICT` are optional.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing(name))
        };
        let mut config = Self::new(
            required("VOUCHERIFY_APP_ID")?,
            required("VOUCHERIFY_SECRET_KEY")?,
        );
        if let Some(endpoint) = lookup("VOUCHERIFY_API_ENDPOINT").filter(|v| !v.is_empty()) {
            config.api_endpoint = Some(endpoint);
        }
        if let Some(raw) = lookup("VOUCHERIFY_TIMEOUT_MS") {
            let millis = raw.trim().parse::<u64>().map_err(|_| ConfigError::Invalid {
                name: "VOUCHERIFY_TIMEOUT_MS",
                value: raw.clone(),
            })?;
            config.timeout = Duration::from_millis(millis);
        }
        if let Some(raw) = lookup("VOUCHERIFY_STRICT") {
            config.strict = parse_bool(&raw).ok_or(ConfigError::Invalid {
                name: "VOUCHERIFY_STRICT",
                value: raw.clone(),
            })?;
        }
        Ok(config)
    }

    pub fn endpoint(&self) -> &str {
        self.api_endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT)
    }

    /// Endpoint plus the `/v1` version prefix.
    pub fn base_url(&self) -> String {
        format!("{}/v1", self.endpoint().trim_end_matches('/'))
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("application_id", &self.application_id)
            .field("client_secret_key", &"<redacted>")
            .field("api_endpoint", &self.api_endpoint)
            .field("timeout", &self.timeout)
            .field("strict", &self.strict)
            .finish()
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
