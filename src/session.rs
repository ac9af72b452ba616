use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

use crate::error::{AssistantError, Result};
use crate::intent;
use crate::models::{ChatMessage, ChatRequest, ChatResponse, ChatTranscript, Role};
use crate::store::TranscriptStore;

/// Shown when the backend call fails; the user's message stays in the
/// transcript and a fresh submit retries.
pub const RETRY_MESSAGE: &str = "Failed to get response. Please try again.";

/// Visible state of the chat widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetState {
    Closed,
    /// Open and ready for input.
    Idle,
    /// Open with one backend call in flight; submits are refused.
    AwaitingReply,
    /// Open, showing an inline error. Accepts input exactly like `Idle`.
    Error,
}

impl WidgetState {
    pub fn is_open(&self) -> bool {
        !matches!(self, WidgetState::Closed)
    }
}

/// What a `submit` call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Nothing happened: widget closed, reply in flight, or blank draft.
    Ignored,
    /// Intent parsing rejected the draft; no backend call was made.
    Rejected,
    /// The bot reply was appended to the transcript.
    Answered,
    /// The backend call failed after the user message was appended.
    Failed,
}

/// Remote seam to `POST /api/chat`.
#[async_trait]
pub trait AssistantBackend: Send + Sync {
    async fn chat(&self, req: &ChatRequest) -> Result<String>;
}

/// Production backend client with an explicit request timeout.
pub struct HttpBackend {
    client: Client,
    endpoint: String,
}

impl HttpBackend {
    pub fn new(endpoint: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl AssistantBackend for HttpBackend {
    async fn chat(&self, req: &ChatRequest) -> Result<String> {
        let response = self.client.post(&self.endpoint).json(req).send().await?;
        if !response.status().is_success() {
            return Err(AssistantError::Internal(format!(
                "chat endpoint returned {}",
                response.status()
            )));
        }
        let body: ChatResponse = response.json().await?;
        Ok(body.response)
    }
}

/// Drives one chat widget: open/close lifecycle, turn-taking, and
/// write-through persistence of the transcript.
pub struct SessionController {
    backend: Arc<dyn AssistantBackend>,
    store: Arc<dyn TranscriptStore>,
    state: WidgetState,
    transcript: ChatTranscript,
    draft: String,
    error: Option<String>,
    history_loaded: bool,
}

impl SessionController {
    pub fn new(backend: Arc<dyn AssistantBackend>, store: Arc<dyn TranscriptStore>) -> Self {
        Self {
            backend,
            store,
            state: WidgetState::Closed,
            transcript: ChatTranscript::seeded(),
            draft: String::new(),
            error: None,
            history_loaded: false,
        }
    }

    pub fn state(&self) -> WidgetState {
        self.state
    }

    pub fn transcript(&self) -> &ChatTranscript {
        &self.transcript
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Open the widget. The persisted transcript is loaded on the first
    /// open only; later opens keep the in-memory transcript.
    pub fn open(&mut self) -> Result<()> {
        if self.state.is_open() {
            return Ok(());
        }
        if !self.history_loaded {
            self.transcript = self.store.load()?.unwrap_or_else(ChatTranscript::seeded);
            self.history_loaded = true;
        }
        self.state = WidgetState::Idle;
        Ok(())
    }

    pub fn close(&mut self) {
        self.state = WidgetState::Closed;
    }

    /// A click or focus event outside the widget closes it unconditionally.
    pub fn click_outside(&mut self) {
        self.close();
    }

    /// Submit the current draft.
    ///
    /// Exactly one backend call per accepted message. An invalid draft is
    /// kept in the input with inline guidance; a backend failure keeps the
    /// already-appended user message and asks the user to retry.
    pub async fn submit(&mut self) -> Result<SubmitOutcome> {
        if !self.state.is_open() || self.state == WidgetState::AwaitingReply {
            return Ok(SubmitOutcome::Ignored);
        }
        if self.draft.trim().is_empty() {
            return Ok(SubmitOutcome::Ignored);
        }

        let Some(parsed) = intent::parse(&self.draft) else {
            self.error = Some(intent::GUIDANCE.to_string());
            self.state = WidgetState::Error;
            return Ok(SubmitOutcome::Rejected);
        };

        let user_input = std::mem::take(&mut self.draft);
        self.append(ChatMessage::new(Role::User, user_input.clone()))?;
        self.error = None;
        self.state = WidgetState::AwaitingReply;

        let request = ChatRequest::new(user_input, parsed.city);
        match self.backend.chat(&request).await {
            Ok(reply) => {
                // A close racing the reply never retracts the append; only
                // the visible surface stays closed.
                self.append(ChatMessage::new(Role::Bot, reply))?;
                if self.state.is_open() {
                    self.state = WidgetState::Idle;
                    self.error = None;
                }
                Ok(SubmitOutcome::Answered)
            }
            Err(e) => {
                tracing::warn!(error = %e, "assistant backend call failed");
                if self.state.is_open() {
                    self.state = WidgetState::Error;
                    self.error = Some(RETRY_MESSAGE.to_string());
                }
                Ok(SubmitOutcome::Failed)
            }
        }
    }

    /// Append one message and write the transcript through to the store.
    fn append(&mut self, message: ChatMessage) -> Result<()> {
        self.transcript.push(message);
        self.store.save(&self.transcript)
    }
}
