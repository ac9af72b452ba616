use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::error::{AssistantError, Result};
use crate::models::WeatherContext;

/// Current-conditions lookup for one city. Consumed collaborator; any
/// failure surfaces as [`AssistantError::UpstreamUnavailable`].
#[async_trait]
pub trait WeatherLookup: Send + Sync {
    async fn current(&self, city: &str) -> Result<WeatherContext>;
}

/// OpenWeather client. Metric units, no retries, explicit request timeout.
pub struct OpenWeatherClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OpenWeatherClient {
    pub fn new(base_url: String, api_key: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }
}

// Subset of the OpenWeather response we actually read.
#[derive(Debug, Deserialize)]
struct WeatherPayload {
    weather: Vec<WeatherEntry>,
    main: MainEntry,
}

#[derive(Debug, Deserialize)]
struct WeatherEntry {
    description: String,
}

#[derive(Debug, Deserialize)]
struct MainEntry {
    temp: f64,
    pressure: f64,
}

impl WeatherPayload {
    fn into_context(self) -> Result<WeatherContext> {
        let description = self
            .weather
            .into_iter()
            .next()
            .map(|w| w.description)
            .ok_or_else(|| {
                AssistantError::UpstreamUnavailable(
                    "weather response carried no conditions".to_string(),
                )
            })?;
        Ok(WeatherContext {
            weather_description: description,
            temperature: self.main.temp,
            // Pressure doubles as the air-quality proxy, see WeatherContext.
            air_quality: self.main.pressure,
        })
    }
}

#[async_trait]
impl WeatherLookup for OpenWeatherClient {
    async fn current(&self, city: &str) -> Result<WeatherContext> {
        tracing::info!(city, "fetching current weather");

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(|e| AssistantError::UpstreamUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AssistantError::UpstreamUnavailable(format!(
                "weather provider returned {} for city {city:?}",
                response.status()
            )));
        }

        let payload: WeatherPayload = response
            .json()
            .await
            .map_err(|e| AssistantError::UpstreamUnavailable(e.to_string()))?;
        payload.into_context()
    }
}
