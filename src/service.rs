use std::sync::Arc;

use crate::config::Config;
use crate::error::Result;
use crate::synth::{GeminiSynth, Synthesizer};
use crate::transport::{GeminiTransport, GenerativeTransport};
use crate::weather::{OpenWeatherClient, WeatherLookup};

/// Business logic behind `POST /api/chat`: fetch conditions for the city,
/// then ask the language model to answer against them. Stateless per call;
/// conversation history lives client-side only.
pub struct AssistantService {
    weather: Arc<dyn WeatherLookup>,
    synth: Arc<dyn Synthesizer>,
}

impl AssistantService {
    pub fn new(cfg: &Config) -> Result<Self> {
        let weather = Arc::new(OpenWeatherClient::new(
            cfg.weather.base_url.clone(),
            cfg.weather.api_key.clone(),
            cfg.weather_timeout(),
        )?);

        let transport = Arc::new(GeminiTransport::new(
            cfg.gemini.base_url.clone(),
            cfg.gemini.api_key.clone(),
            cfg.gemini_timeout(),
        )?);
        let synth = Arc::new(GeminiSynth::new(
            transport as Arc<dyn GenerativeTransport>,
            cfg.gemini.model.clone(),
        ));

        Ok(Self { weather, synth })
    }

    /// Assemble from explicit collaborators. Used by tests and by any
    /// embedding that brings its own clients.
    pub fn with_parts(weather: Arc<dyn WeatherLookup>, synth: Arc<dyn Synthesizer>) -> Self {
        Self { weather, synth }
    }

    pub async fn answer(&self, user_input: &str, city: &str) -> Result<String> {
        let weather = self.weather.current(city).await?;
        self.synth.answer(user_input, city, &weather).await
    }
}
