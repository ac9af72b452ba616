use async_trait::async_trait;
use std::sync::Arc;

use crate::error::{AssistantError, Result};
use crate::models::{
    Content, GenerateRequest, GenerationConfig, SafetySetting, WeatherContext,
};
use crate::transport::GenerativeTransport;

/// Persona turn seeding every conversation sent upstream.
const PERSONA_PROMPT: &str = "You are Sam, a friendly assistant who works for AirGlobe, \
a weather and map exploration site. Answer questions about weather and air quality \
using only the conditions provided in the conversation, and keep replies short and warm.";

/// The model's fixed opening reply to the persona turn.
const PERSONA_GREETING: &str =
    "Hello! Welcome to AirGlobe. I'm Sam, happy to help with weather and air quality questions.";

// Sampling knobs are fixed constants, not user-configurable.
const TEMPERATURE: f32 = 0.9;
const TOP_K: i32 = 1;
const TOP_P: f32 = 1.0;
const MAX_OUTPUT_TOKENS: i32 = 1000;

/// Composes the grounded prompt and returns the model's reply text.
#[async_trait]
pub trait Synthesizer: Send + Sync {
    async fn answer(
        &self,
        user_input: &str,
        city: &str,
        weather: &WeatherContext,
    ) -> Result<String>;
}

pub struct GeminiSynth {
    tx: Arc<dyn GenerativeTransport>,
    model: String,
}

impl GeminiSynth {
    pub fn new(tx: Arc<dyn GenerativeTransport>, model: String) -> Self {
        Self { tx, model }
    }

    /// Single grounding message: live conditions plus the user's question
    /// restated verbatim. Prior turns are deliberately never included, so
    /// every question is answered against fresh weather data.
    fn grounding_message(user_input: &str, city: &str, weather: &WeatherContext) -> String {
        format!(
            "The current weather in {city} is {description}, with a temperature of \
             {temperature}°C. The air quality pressure is at {pressure} hPa. \
             Based on this information, please respond to: {user_input}",
            description = weather.weather_description,
            temperature = weather.temperature,
            pressure = weather.air_quality,
        )
    }
}

#[async_trait]
impl Synthesizer for GeminiSynth {
    async fn answer(
        &self,
        user_input: &str,
        city: &str,
        weather: &WeatherContext,
    ) -> Result<String> {
        tracing::info!(city, "synthesizing grounded reply");

        let request = GenerateRequest {
            contents: vec![
                Content::user(PERSONA_PROMPT),
                Content::model(PERSONA_GREETING),
                Content::user(Self::grounding_message(user_input, city, weather)),
            ],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                top_k: TOP_K,
                top_p: TOP_P,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
            safety_settings: vec![SafetySetting {
                category: "HARM_CATEGORY_HARASSMENT".to_string(),
                threshold: "BLOCK_MEDIUM_AND_ABOVE".to_string(),
            }],
        };

        let response = self.tx.generate(&self.model, &request).await?;

        response
            .first_text()
            .map(|text| text.to_string())
            .ok_or_else(|| {
                AssistantError::Internal(
                    "generative provider returned no candidates".to_string(),
                )
            })
    }
}
