use std::env;
use std::time::Duration;

use url::Url;

use crate::errors::BotError;

pub const DEFAULT_WEATHER_API_BASE_URL: &str = "https://api.openweathermap.org";
pub const DEFAULT_LINE_API_BASE_URL: &str = "https://api.line.me";
pub const DEFAULT_WEATHER_CITY: &str = "Tokyo,jp";
pub const DEFAULT_WEATHER_TIMEOUT_SECS: u64 = 5;

/// Immutable credentials and endpoints, built once at cold start.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub line_channel_secret: String,
    pub line_channel_access_token: String,
    pub line_api_base_url: Url,
    pub weather_api_key: String,
    pub weather_api_base_url: Url,
    pub weather_city: String,
    pub weather_timeout: Duration,
}

impl AppConfig {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::ConfigError`] naming the first required variable that is
    /// missing or blank, or the first optional one that fails to parse.
    pub fn from_env() -> Result<Self, BotError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`AppConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, BotError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> Result<String, BotError> {
            match lookup(key) {
                Some(v) if !v.trim().is_empty() => Ok(v),
                Some(_) => Err(BotError::ConfigError(format!("{key} is empty"))),
                None => Err(BotError::ConfigError(format!("{key} is not set"))),
            }
        };
        let optional = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        // Endpoint paths are joined relative to these, so keep any path prefix
        // by forcing a trailing slash.
        let url = |key: &str, default: &str| -> Result<Url, BotError> {
            let raw = optional(key).unwrap_or_else(|| default.to_string());
            let mut url =
                Url::parse(&raw).map_err(|e| BotError::ConfigError(format!("{key}: {e}")))?;
            if !url.path().ends_with('/') {
                let path = format!("{}/", url.path());
                url.set_path(&path);
            }
            Ok(url)
        };

        let weather_timeout = match optional("WEATHER_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .ok_or_else(|| {
                    BotError::ConfigError(format!(
                        "WEATHER_TIMEOUT_SECS: expected a positive integer, got '{raw}'"
                    ))
                })?,
            None => Duration::from_secs(DEFAULT_WEATHER_TIMEOUT_SECS),
        };

        Ok(Self {
            line_channel_secret: required("LINE_CHANNEL_SECRET")?,
            line_channel_access_token: required("LINE_CHANNEL_ACCESS_TOKEN")?,
            line_api_base_url: url("LINE_API_BASE_URL", DEFAULT_LINE_API_BASE_URL)?,
            weather_api_key: required("WEATHER_API_KEY")?,
            weather_api_base_url: url("WEATHER_API_BASE_URL", DEFAULT_WEATHER_API_BASE_URL)?,
            weather_city: optional("WEATHER_CITY").unwrap_or_else(|| DEFAULT_WEATHER_CITY.to_string()),
            weather_timeout,
        })
    }
}
