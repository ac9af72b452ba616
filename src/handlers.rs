use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::error::{AssistantError, Result};
use crate::models::{ChatRequest, ChatResponse};
use crate::service::AssistantService;

/// Shared state for the chat endpoint.
pub struct AppState {
    pub service: Arc<AssistantService>,
}

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/chat", post(chat))
        .route("/health", get(|| async { "ok" }))
        .with_state(state)
}

/// `POST /api/chat` — one grounded answer per call, no durable side effects.
async fn chat(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ChatRequest>,
) -> Result<Json<ChatResponse>> {
    let user_input = body
        .user_input
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or(AssistantError::MissingParameters)?;
    let city = body
        .city
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or(AssistantError::MissingParameters)?;

    let response = state.service.answer(user_input, city).await?;
    Ok(Json(ChatResponse { response }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AssistantError;
    use crate::models::WeatherContext;
    use crate::synth::Synthesizer;
    use crate::weather::WeatherLookup;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    struct StubWeather {
        fail: bool,
    }

    #[async_trait]
    impl WeatherLookup for StubWeather {
        async fn current(&self, _city: &str) -> crate::error::Result<WeatherContext> {
            if self.fail {
                return Err(AssistantError::UpstreamUnavailable(
                    "city not found".to_string(),
                ));
            }
            Ok(WeatherContext {
                weather_description: "clear sky".to_string(),
                temperature: 21.0,
                air_quality: 1015.0,
            })
        }
    }

    struct StubSynth;

    #[async_trait]
    impl Synthesizer for StubSynth {
        async fn answer(
            &self,
            _user_input: &str,
            city: &str,
            _weather: &WeatherContext,
        ) -> crate::error::Result<String> {
            Ok(format!("It is lovely in {city}."))
        }
    }

    fn test_router(weather_fails: bool) -> Router {
        let service = AssistantService::with_parts(
            Arc::new(StubWeather {
                fail: weather_fails,
            }),
            Arc::new(StubSynth),
        );
        router(Arc::new(AppState {
            service: Arc::new(service),
        }))
    }

    fn chat_post(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/chat")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request")
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("collect body")
            .to_bytes();
        serde_json::from_slice(&bytes).expect("json body")
    }

    #[tokio::test]
    async fn empty_body_yields_missing_parameters() {
        let response = test_router(false)
            .oneshot(chat_post("{}"))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Missing required parameters");
    }

    #[tokio::test]
    async fn missing_city_yields_missing_parameters() {
        let response = test_router(false)
            .oneshot(chat_post(r#"{"userInput": "weather in Rome"}"#))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn valid_request_returns_generated_text() {
        let response = test_router(false)
            .oneshot(chat_post(
                r#"{"userInput": "What is the weather in Rome?", "city": "Rome"}"#,
            ))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["response"], "It is lovely in Rome.");
    }

    #[tokio::test]
    async fn weather_failure_is_a_generic_internal_error() {
        let response = test_router(true)
            .oneshot(chat_post(
                r#"{"userInput": "What is the weather in Atlantis?", "city": "Atlantis"}"#,
            ))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Internal Server Error");
    }

    #[tokio::test]
    async fn health_probe_responds() {
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .expect("request");
        let response = test_router(false).oneshot(request).await.expect("response");
        assert_eq!(response.status(), StatusCode::OK);
    }
}
