//! Application-level configuration loading: remote endpoint, seed location and tracker timings.

use std::{
    env, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;
use tracing::{info, warn};

#[cfg(feature = "http-service")]
use crate::dao::tracker_service::http::{HttpResult, HttpServiceConfig};
use crate::state::{DEFAULT_FEED_REFRESH_LIMIT, TrackerSettings};

/// Default location on disk where the console looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/tracker.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "SIDELINE_TRACKER_CONFIG_PATH";
/// Seed file read when the configuration does not name one.
const DEFAULT_SEED_PATH: &str = "config/seed.json";

#[derive(Debug, Clone, PartialEq)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    base_url: Option<String>,
    csrf_token: Option<String>,
    seed_path: PathBuf,
    timeout: Option<Duration>,
    settings: TrackerSettings,
}

impl AppConfig {
    /// Load the configuration from disk, falling back to built-in defaults.
    pub fn load() -> Self {
        Self::load_from(&resolve_config_path())
    }

    /// Load the configuration stored at `path`; missing or unreadable files yield defaults.
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    let app_config: Self = raw.into();
                    info!(
                        path = %path.display(),
                        seed = %app_config.seed_path.display(),
                        "loaded tracker config"
                    );
                    app_config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    pub fn seed_path(&self) -> &Path {
        &self.seed_path
    }

    pub fn tracker_settings(&self) -> TrackerSettings {
        self.settings
    }

    /// Remote endpoint settings, with `TRACKER_BASE_URL` / `TRACKER_CSRF_TOKEN` taking precedence.
    #[cfg(feature = "http-service")]
    pub fn service_config(&self) -> HttpResult<HttpServiceConfig> {
        let mut config = match &self.base_url {
            Some(base_url) => HttpServiceConfig::new(base_url.clone()).with_env_overrides(),
            None => HttpServiceConfig::from_env()?,
        };
        if config.csrf_token.is_none() {
            if let Some(token) = &self.csrf_token {
                config = config.with_csrf_token(token.clone());
            }
        }
        if let Some(timeout) = self.timeout {
            config = config.with_timeout(timeout);
        }
        Ok(config)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        RawConfig::default().into()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    base_url: Option<String>,
    seed_path: Option<PathBuf>,
    csrf_token: Option<String>,
    http: RawHttp,
    chain: RawChain,
    notifications: RawNotifications,
    feed: RawFeed,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawHttp {
    timeout_ms: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct RawChain {
    delay_ms: u64,
    cancel_on_navigation: bool,
}

impl Default for RawChain {
    fn default() -> Self {
        let settings = TrackerSettings::default();
        Self {
            delay_ms: millis(settings.chain_delay),
            cancel_on_navigation: settings.cancel_chain_on_navigation,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct RawNotifications {
    dismiss_ms: u64,
}

impl Default for RawNotifications {
    fn default() -> Self {
        Self {
            dismiss_ms: millis(TrackerSettings::default().notification_dismiss),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct RawFeed {
    refresh_limit: usize,
}

impl Default for RawFeed {
    fn default() -> Self {
        Self {
            refresh_limit: DEFAULT_FEED_REFRESH_LIMIT,
        }
    }
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        Self {
            base_url: value.base_url.filter(|url| !url.is_empty()),
            csrf_token: value.csrf_token.filter(|token| !token.is_empty()),
            seed_path: value
                .seed_path
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SEED_PATH)),
            timeout: value.http.timeout_ms.map(Duration::from_millis),
            settings: TrackerSettings {
                chain_delay: Duration::from_millis(value.chain.delay_ms),
                cancel_chain_on_navigation: value.chain.cancel_on_navigation,
                notification_dismiss: Duration::from_millis(value.notifications.dismiss_ms),
                feed_refresh_limit: value.feed.refresh_limit,
            },
        }
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}
