use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::error::{AssistantError, Result};
use crate::models::{GenerateRequest, GenerateResponse};

/// Raw HTTP seam to the generative-language provider.
#[async_trait]
pub trait GenerativeTransport: Send + Sync {
    async fn generate(&self, model: &str, req: &GenerateRequest) -> Result<GenerateResponse>;
}

/// Gemini `generateContent` client. One attempt per call; failures are
/// terminal for the turn and retried only by a fresh user action.
pub struct GeminiTransport {
    client: Client,
    base_url: String,
    api_key: String,
}

impl GeminiTransport {
    pub fn new(base_url: String, api_key: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }
}

#[async_trait]
impl GenerativeTransport for GeminiTransport {
    async fn generate(&self, model: &str, req: &GenerateRequest) -> Result<GenerateResponse> {
        let url = format!("{}/models/{}:generateContent", self.base_url, model);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(req)
            .send()
            .await
            .map_err(|e| {
                AssistantError::Internal(format!("failed to reach generative provider: {e}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::error!(%status, body, "generative provider rejected request");
            return Err(AssistantError::Internal(format!(
                "generative provider returned {status}"
            )));
        }

        response.json().await.map_err(|e| {
            AssistantError::Internal(format!("failed to parse generative response: {e}"))
        })
    }
}
