//! Process-wide settings, read once at startup and passed explicitly to the generation client.

use std::{fmt, time::Duration};

use splashgen_model_provider::{GeminiConfig, ModelProvider, ModelProviderConfiguration};
use thiserror::Error;

pub const API_KEY_VAR: &str = "API_KEY";
pub const ENDPOINT_VAR: &str = "GEMINI_ENDPOINT";
pub const TIMEOUT_VAR: &str = "SPLASHGEN_TIMEOUT_SECS";

/// The only model the generator talks to.
pub const GENERATION_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("{0} environment variable is not set")]
    MissingCredential(&'static str),

    #[error("{var} must be a whole number of seconds, got '{value}'")]
    InvalidTimeout { var: &'static str, value: String },
}

#[derive(Clone, PartialEq)]
pub struct Settings {
    api_key: String,
    endpoint: Option<String>,
    request_timeout: Option<Duration>,
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl Settings {
    pub fn new(api_key: impl Into<String>) -> Self {
        Settings {
            api_key: api_key.into(),
            endpoint: None,
            request_timeout: Some(DEFAULT_REQUEST_TIMEOUT),
        }
    }

    /// Reads the process environment. A missing credential is fatal.
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SettingsError> {
        let api_key = lookup(API_KEY_VAR)
            .filter(|key| !key.trim().is_empty())
            .ok_or(SettingsError::MissingCredential(API_KEY_VAR))?;

        let endpoint = lookup(ENDPOINT_VAR).filter(|endpoint| !endpoint.trim().is_empty());

        let request_timeout = match lookup(TIMEOUT_VAR) {
            None => Some(DEFAULT_REQUEST_TIMEOUT),
            Some(value) => {
                let seconds = value.trim().parse::<u64>().map_err(|_| {
                    SettingsError::InvalidTimeout {
                        var: TIMEOUT_VAR,
                        value: value.clone(),
                    }
                })?;
                (seconds > 0).then(|| Duration::from_secs(seconds))
            }
        };

        Ok(Settings {
            api_key,
            endpoint,
            request_timeout,
        })
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// `None` leaves timing to the transport.
    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }

    pub fn model_provider(&self) -> ModelProvider {
        ModelProvider::gemini(GENERATION_MODEL)
    }

    pub fn provider_configuration(&self) -> ModelProviderConfiguration {
        ModelProviderConfiguration {
            gemini_config: vec![GeminiConfig {
                api_key: Some(self.api_key.clone()),
                endpoint: self.endpoint.clone(),
            }],
        }
    }
}
