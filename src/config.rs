use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Main configuration structure for the AirGlobe assistant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub weather: WeatherConfig,
    pub gemini: GeminiConfig,
    pub chat: ChatConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// host:port the chat endpoint binds to.
    pub bind: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Where the session controller persists its transcript record.
    pub history_path: String,
    /// Full URL of the chat endpoint the widget posts to.
    pub endpoint: String,
    pub timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                bind: "127.0.0.1:3000".to_string(),
            },
            weather: WeatherConfig {
                api_key: String::new(),
                base_url: "https://api.openweathermap.org/data/2.5/weather".to_string(),
                timeout_seconds: 30,
            },
            gemini: GeminiConfig {
                api_key: String::new(),
                model: "gemini-2.0-flash".to_string(),
                base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
                timeout_seconds: 30,
            },
            chat: ChatConfig {
                history_path: "airglobe_chat_history.json".to_string(),
                endpoint: "http://127.0.0.1:3000/api/chat".to_string(),
                timeout_seconds: 30,
            },
        }
    }
}

impl Config {
    /// Load configuration from file with environment variable overrides.
    /// Always returns a valid config; problems are logged, never fatal.
    pub fn load() -> Self {
        // Secrets live in .env during local development.
        let env_paths = ["../.env", ".env"];
        let mut env_loaded = false;
        for path in &env_paths {
            if dotenvy::from_path(path).is_ok() {
                tracing::info!("Loaded .env from: {}", path);
                env_loaded = true;
                break;
            }
        }
        if !env_loaded {
            tracing::debug!("No .env file found - continuing with process env only");
        }

        let config_path =
            env::var("AIRGLOBE_CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());

        let mut config = if Path::new(&config_path).exists() {
            match fs::read_to_string(&config_path) {
                Ok(contents) => match serde_yaml::from_str::<Config>(&contents) {
                    Ok(config) => {
                        tracing::info!("Loaded configuration from {}", config_path);
                        config
                    }
                    Err(e) => {
                        tracing::error!(
                            "Failed to parse config file {}: {} - using defaults",
                            config_path,
                            e
                        );
                        Self::default()
                    }
                },
                Err(e) => {
                    tracing::error!(
                        "Failed to read config file {}: {} - using defaults",
                        config_path,
                        e
                    );
                    Self::default()
                }
            }
        } else {
            tracing::warn!("Config file not found at {} - using defaults", config_path);
            Self::default()
        };

        config.apply_env_overrides();

        if let Err(e) = config.validate() {
            tracing::warn!("Config validation warnings: {} - continuing anyway", e);
        }

        config
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(bind) = env::var("AIRGLOBE_HTTP_BIND") {
            self.server.bind = bind;
        }

        if let Ok(api_key) = env::var("WEATHER_API_KEY") {
            self.weather.api_key = api_key;
        }
        if let Ok(base_url) = env::var("WEATHER_API_URL") {
            self.weather.base_url = base_url;
        }

        if let Ok(api_key) = env::var("GEMINI_API_KEY") {
            self.gemini.api_key = api_key;
        }
        if let Ok(model) = env::var("GEMINI_MODEL") {
            self.gemini.model = model;
        }

        if let Ok(path) = env::var("AIRGLOBE_CHAT_HISTORY_PATH") {
            self.chat.history_path = path;
        }
        if let Ok(endpoint) = env::var("AIRGLOBE_CHAT_ENDPOINT") {
            self.chat.endpoint = endpoint;
        }
    }

    /// Validate configuration.
    fn validate(&self) -> Result<(), Box<dyn std::error::Error>> {
        if self.weather.api_key.is_empty() {
            return Err("WEATHER_API_KEY environment variable must be set".into());
        }
        if self.gemini.api_key.is_empty() {
            return Err("GEMINI_API_KEY environment variable must be set".into());
        }
        if self.weather.timeout_seconds == 0 || self.gemini.timeout_seconds == 0 {
            return Err("Upstream timeouts cannot be 0".into());
        }
        Ok(())
    }

    pub fn weather_timeout(&self) -> Duration {
        Duration::from_secs(self.weather.timeout_seconds)
    }

    pub fn gemini_timeout(&self) -> Duration {
        Duration::from_secs(self.gemini.timeout_seconds)
    }

    pub fn chat_timeout(&self) -> Duration {
        Duration::from_secs(self.chat.timeout_seconds)
    }
}
