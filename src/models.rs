use serde::{Deserialize, Serialize};

/// Author of a chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Bot,
}

/// One turn in a transcript. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
}

impl ChatMessage {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }
}

/// Welcome entry seeded into every fresh transcript.
pub const WELCOME_MESSAGE: &str = "Welcome to AirGlobe! How can I help you today?";

/// Append-only, ordered conversation log for one visitor session.
///
/// Serializes as a bare message array so the persisted record keeps the
/// `{ "value": [...], "timestamp": ... }` shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatTranscript {
    messages: Vec<ChatMessage>,
}

impl ChatTranscript {
    /// Fresh transcript containing only the system welcome message.
    pub fn seeded() -> Self {
        Self {
            messages: vec![ChatMessage::new(Role::System, WELCOME_MESSAGE)],
        }
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Default for ChatTranscript {
    fn default() -> Self {
        Self::seeded()
    }
}

/// On-disk shape of the persisted transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedChatRecord {
    pub value: ChatTranscript,
    /// Epoch milliseconds of the last save.
    pub timestamp: i64,
}

/// Wire request accepted by `POST /api/chat`.
///
/// Fields are optional so an empty body still deserializes and gets the
/// endpoint's own 400 instead of an extractor rejection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub user_input: Option<String>,
    pub city: Option<String>,
}

impl ChatRequest {
    pub fn new(user_input: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            user_input: Some(user_input.into()),
            city: Some(city.into()),
        }
    }
}

/// Wire response returned by `POST /api/chat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

/// Current conditions fetched for one grounding prompt. Not persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherContext {
    pub weather_description: String,
    /// Celsius.
    pub temperature: f64,
    /// Barometric pressure in hPa, carried under the historical
    /// air-quality label. Flagged for product review; do not swap in a
    /// real AQI without a requirements change.
    pub air_quality: f64,
}

// Gemini generateContent wire format

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    pub role: String,
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            parts: vec![Part { text: text.into() }],
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: "model".to_string(),
            parts: vec![Part { text: text.into() }],
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub top_k: i32,
    pub top_p: f32,
    pub max_output_tokens: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct SafetySetting {
    pub category: String,
    pub threshold: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
    pub safety_settings: Vec<SafetySetting>,
}

#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Content,
}

impl GenerateResponse {
    /// Text of the first candidate, if the model returned any.
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.as_str())
    }
}
