//! Runtime settings.
//!
//! Values come from, in increasing precedence: built-in defaults, an optional
//! `calfeed.toml` in the working directory, a `.env` file and the process environment.
//!
//! | variable            | meaning                                              |
//! |---------------------|------------------------------------------------------|
//! | `CALENDAR_ICS_URLS` | comma-separated feed URLs                            |
//! | `CALENDAR_TIMEZONE` | IANA zone for date-only/floating times (default local) |
//! | `HTTP_TIMEOUT_SECS` | per-feed request timeout, default 10                 |
//! | `HTTP_USER_AGENT`   | user agent sent with feed requests                   |
//! | `LOG_LEVEL`         | `tracing` filter directive, default `info`           |

use std::time::Duration;

use config::{Config, ConfigBuilder, Environment, File, builder::DefaultState};
use serde::Deserialize;

use crate::types::Tz;

const CONFIG_FILE: &str = "calfeed";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Load(#[from] config::ConfigError),
    #[error("unknown timezone: {0}")]
    UnknownTimezone(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub calendar_ics_urls: String,
    pub calendar_timezone: Option<String>,
    pub http_timeout_secs: u64,
    pub http_user_agent: Option<String>,
    pub log_level: String,
}

impl Settings {
    /// Load settings from `calfeed.toml`, `.env` and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self::builder()?
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(Environment::default())
            .build()?
            .try_deserialize()?)
    }

    /// Load settings from the given variables only, ignoring the process environment.
    pub fn from_vars<K, V>(vars: impl IntoIterator<Item = (K, V)>) -> Result<Self, ConfigError>
    where
        K: Into<String>,
        V: Into<String>,
    {
        let vars: config::Map<String, String> = vars
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();

        Ok(Self::builder()?
            .add_source(Environment::default().source(Some(vars)))
            .build()?
            .try_deserialize()?)
    }

    fn builder() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Ok(Config::builder()
            .set_default("calendar_ics_urls", "")?
            .set_default("http_timeout_secs", 10)?
            .set_default("log_level", "info")?)
    }

    /// Configured feed URLs, trimmed, empty entries removed.
    pub fn feed_urls(&self) -> Vec<String> {
        self.calendar_ics_urls
            .split(',')
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(str::to_owned)
            .collect()
    }

    pub fn timezone(&self) -> Result<Tz, ConfigError> {
        match self.calendar_timezone.as_deref().map(str::trim) {
            None | Some("") => Ok(Tz::Local),
            Some(name) => {
                Tz::from_name(name).ok_or_else(|| ConfigError::UnknownTimezone(name.to_owned()))
            }
        }
    }

    #[inline]
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}
