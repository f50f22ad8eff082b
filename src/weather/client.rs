//! HTTP client for the OpenWeatherMap current-weather API
//!
//! Every call is a single GET with no retry and no caching. Failures are
//! classified into a [`WeatherOutcome`] instead of being returned as errors,
//! so callers never have to handle a transport error themselves.

use anyhow::Result;
use async_trait::async_trait;
use reqwest::{Client as HttpClient, StatusCode};
use std::time::Duration;
use tracing::{debug, error, warn};

use crate::config::Config;
use crate::weather::model::{CurrentWeatherResponse, ProviderFailure, WeatherOutcome, WeatherQuery};

/// Source of current weather readings
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Whether credentials are present, so a fetch can reach the network at all
    fn is_configured(&self) -> bool;

    /// Look up the current weather for a place
    ///
    /// # Arguments
    /// * `query` - The validated place name
    ///
    /// # Returns
    /// Exactly one classified outcome
    async fn fetch(&self, query: &WeatherQuery) -> WeatherOutcome;
}

/// OpenWeatherMap-backed weather provider
pub struct WeatherClient {
    /// HTTP client for API calls
    http_client: HttpClient,
    /// Base URL of the provider, without a trailing slash
    base_url: String,
    /// API key, None when not configured
    api_key: Option<String>,
    /// Language for condition descriptions
    lang: String,
}

impl WeatherClient {
    /// Create a new weather client
    ///
    /// # Arguments
    /// * `base_url` - Provider base URL (e.g. "https://api.openweathermap.org")
    /// * `api_key` - Provider API key; empty strings count as missing
    /// * `lang` - Response language preference
    /// * `timeout` - Timeout applied to each request
    ///
    /// # Returns
    /// A new WeatherClient instance
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        lang: &str,
        timeout: Duration,
    ) -> Result<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            lang: lang.to_string(),
        })
    }

    /// Create a weather client from the process configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            &config.weather_api_url,
            config.weather_api_key.clone(),
            &config.weather_lang,
            Duration::from_secs(config.weather_timeout_secs),
        )
    }

    fn endpoint(&self) -> String {
        format!("{}/data/2.5/weather", self.base_url)
    }
}

#[async_trait]
impl WeatherProvider for WeatherClient {
    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn fetch(&self, query: &WeatherQuery) -> WeatherOutcome {
        let Some(api_key) = &self.api_key else {
            warn!("Weather API key is not configured, skipping request");
            return WeatherOutcome::ConfigMissing;
        };

        let place = query.place_name();
        debug!("Requesting current weather for {}", place);

        let response = match self
            .http_client
            .get(self.endpoint())
            .query(&[
                ("q", place),
                ("appid", api_key.as_str()),
                ("units", "metric"),
                ("lang", self.lang.as_str()),
            ])
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                error!("Weather request for {} failed: {}", place, e);
                return WeatherOutcome::NetworkError;
            }
        };

        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            warn!("Weather provider does not know {}", place);
            return WeatherOutcome::NotFound(place.to_string());
        }

        if status != StatusCode::OK {
            error!("Weather provider returned {} for {}", status, place);
            return WeatherOutcome::ProviderError(ProviderFailure::Status(status.as_u16()));
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                error!("Failed to read weather response for {}: {}", place, e);
                return WeatherOutcome::NetworkError;
            }
        };

        let reading = serde_json::from_str::<CurrentWeatherResponse>(&body)
            .ok()
            .and_then(CurrentWeatherResponse::into_reading);

        match reading {
            Some(reading) => {
                debug!("Weather for {}: {:?}", place, reading);
                WeatherOutcome::Success(reading)
            }
            None => {
                error!("Malformed weather response for {}: {}", place, body);
                WeatherOutcome::ProviderError(ProviderFailure::MalformedBody)
            }
        }
    }
}
