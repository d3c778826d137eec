use std::time::Duration;

use super::error::{HttpResult, HttpServiceError};

const BASE_URL_ENV: &str = "TRACKER_BASE_URL";
const CSRF_TOKEN_ENV: &str = "TRACKER_CSRF_TOKEN";

/// Runtime configuration describing how to reach the tracker endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpServiceConfig {
    pub base_url: String,
    pub csrf_token: Option<String>,
    pub timeout: Option<Duration>,
}

impl HttpServiceConfig {
    /// Construct a configuration from an explicit base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            csrf_token: None,
            timeout: None,
        }
    }

    /// Attach the anti-forgery token sent as `X-CSRFToken`.
    pub fn with_csrf_token(mut self, token: impl Into<String>) -> Self {
        self.csrf_token = Some(token.into());
        self
    }

    /// Bound every request by `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build a configuration by reading the expected environment variables.
    pub fn from_env() -> HttpResult<Self> {
        let base_url = std::env::var(BASE_URL_ENV)
            .map_err(|_| HttpServiceError::MissingEnvVar { var: BASE_URL_ENV })?;
        Ok(Self::new(base_url).with_env_overrides())
    }

    /// Let the environment override the base URL and token loaded from the config file.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(base_url) = non_empty_env(BASE_URL_ENV) {
            self.base_url = base_url;
        }
        if let Some(token) = non_empty_env(CSRF_TOKEN_ENV) {
            self.csrf_token = Some(token);
        }
        self
    }
}

fn non_empty_env(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|value| !value.is_empty())
}
