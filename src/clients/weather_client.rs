//! OpenWeather current-conditions client.

use anyhow::{Context, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{info, warn};
use url::Url;

use super::WeatherSource;
use crate::core::config::AppConfig;
use crate::core::models::{WeatherOutcome, WeatherSummary};
use crate::errors::BotError;

const CURRENT_WEATHER_PATH: &str = "data/2.5/weather";

#[derive(Debug, Deserialize)]
struct CurrentWeatherResponse {
    weather: Vec<ConditionEntry>,
    main: MainReadings,
}

#[derive(Debug, Deserialize)]
struct ConditionEntry {
    description: String,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    temp: f64,
    feels_like: f64,
}

impl TryFrom<CurrentWeatherResponse> for WeatherSummary {
    type Error = anyhow::Error;

    fn try_from(resp: CurrentWeatherResponse) -> Result<Self, Self::Error> {
        let description = resp
            .weather
            .into_iter()
            .next()
            .map(|c| c.description)
            .filter(|d| !d.trim().is_empty())
            .ok_or_else(|| anyhow!("response has no weather description"))?;

        Ok(WeatherSummary {
            description,
            temperature_c: resp.main.temp,
            feels_like_c: resp.main.feels_like,
        })
    }
}

pub struct WeatherClient {
    http: Client,
    endpoint: Url,
    api_key: String,
    city: String,
}

impl WeatherClient {
    /// Builds a client whose requests are bounded by `config.weather_timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::ConfigError`] if the HTTP client cannot be built or the
    /// base URL cannot be joined with the endpoint path.
    pub fn new(config: &AppConfig) -> Result<Self, BotError> {
        let http = Client::builder()
            .timeout(config.weather_timeout)
            .build()
            .map_err(|e| BotError::ConfigError(format!("weather HTTP client: {e}")))?;
        let endpoint = config
            .weather_api_base_url
            .join(CURRENT_WEATHER_PATH)
            .map_err(|e| BotError::ConfigError(format!("WEATHER_API_BASE_URL: {e}")))?;

        Ok(Self {
            http,
            endpoint,
            api_key: config.weather_api_key.clone(),
            city: config.weather_city.clone(),
        })
    }

    /// One GET against the provider, no retries.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::ProviderUnavailable`] on transport failure, a non-2xx
    /// status, or a body that doesn't match the expected schema.
    pub async fn fetch(&self) -> Result<WeatherSummary, BotError> {
        Ok(self.request().await?)
    }

    async fn request(&self) -> anyhow::Result<WeatherSummary> {
        let resp = self
            .http
            .get(self.endpoint.clone())
            .query(&[
                ("q", self.city.as_str()),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
                ("lang", "ja"),
            ])
            .send()
            .await
            .context("weather request failed")?;

        let status = resp.status();
        if !status.is_success() {
            return Err(anyhow!("weather provider returned {status}"));
        }

        let body: CurrentWeatherResponse = resp
            .json()
            .await
            .context("weather response did not match the expected schema")?;

        WeatherSummary::try_from(body)
    }
}

#[async_trait]
impl WeatherSource for WeatherClient {
    async fn fetch_tokyo_weather(&self) -> WeatherOutcome {
        match self.fetch().await {
            Ok(summary) => {
                info!(
                    description = %summary.description,
                    temperature_c = summary.temperature_c,
                    "Fetched weather"
                );
                WeatherOutcome::Available(summary)
            }
            Err(e) => {
                warn!(city = %self.city, "Weather lookup failed: {}", e);
                WeatherOutcome::Unavailable
            }
        }
    }
}
