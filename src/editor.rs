//! AI-assisted text editing over an OpenAI-compatible chat-completions API.
//!
//! `EditAction` names the supported transformations and builds their prompts.
//! `TextEditor` is the seam used by the HTTP layer; `OpenAiEditor` is the
//! production implementation backed by `reqwest`.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::{EditorConfig, USER_AGENT};

/// Error type for text editing operations
#[derive(Debug, thiserror::Error)]
pub enum EditError {
    #[error("Invalid action type: {0}")]
    InvalidAction(String),

    #[error("No choices found in the response")]
    NoChoices,

    #[error("API Error: {0}")]
    Api(String),

    #[error("Unknown error occurred (upstream status {0})")]
    Unknown(reqwest::StatusCode),

    #[error("Request to text editor failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Malformed response from text editor: {0}")]
    Decode(#[from] serde_json::Error),
}

/// A text transformation the editor can apply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditAction {
    Paraphrase,
    Expand,
    Summarize,
    Translate,
}

impl EditAction {
    /// The command string clients use to request this action
    pub fn as_str(&self) -> &'static str {
        match self {
            EditAction::Paraphrase => "paraphrase",
            EditAction::Expand => "expand",
            EditAction::Summarize => "summarize",
            EditAction::Translate => "translate",
        }
    }

    /// Build the user prompt sent upstream for `text`.
    pub fn prompt(&self, text: &str) -> String {
        match self {
            EditAction::Paraphrase => format!("Paraphrase this text: {}", text),
            EditAction::Expand => format!("Expand this text: {}", text),
            EditAction::Summarize => format!("Summarize this text: {}", text),
            EditAction::Translate => format!("Translate this text into French: {}", text),
        }
    }
}

impl FromStr for EditAction {
    type Err = EditError;

    fn from_str(command: &str) -> Result<Self, Self::Err> {
        match command {
            "paraphrase" => Ok(EditAction::Paraphrase),
            "expand" => Ok(EditAction::Expand),
            "summarize" => Ok(EditAction::Summarize),
            "translate" => Ok(EditAction::Translate),
            other => Err(EditError::InvalidAction(other.to_string())),
        }
    }
}

impl fmt::Display for EditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Applies an `EditAction` to a piece of text.
#[async_trait]
pub trait TextEditor: Send + Sync {
    async fn edit(&self, action: EditAction, text: &str) -> Result<String, EditError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Option<Vec<ChatChoice>>,
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

impl ChatResponse {
    fn into_first_content(self) -> Option<String> {
        self.choices?
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
    }
}

/// `TextEditor` backed by an OpenAI-compatible chat-completions endpoint.
#[derive(Clone)]
pub struct OpenAiEditor {
    http_client: reqwest::Client,
    endpoint: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
    api_key: String,
}

impl fmt::Debug for OpenAiEditor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiEditor")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .finish_non_exhaustive()
    }
}

impl OpenAiEditor {
    pub fn new(config: &EditorConfig, api_key: String) -> Result<Self, EditError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            http_client,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            api_key,
        })
    }
}

#[async_trait]
impl TextEditor for OpenAiEditor {
    #[tracing::instrument(name = "editor::edit", skip(self, action, text), fields(action = %action, chars = text.len()))]
    async fn edit(&self, action: EditAction, text: &str) -> Result<String, EditError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: action.prompt(text),
            }],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let response = self
            .http_client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        tracing::debug!(status = status.as_u16(), bytes = body.len(), "Upstream responded");

        if status.is_success() {
            let parsed: ChatResponse = serde_json::from_slice(&body)?;
            return parsed
                .into_first_content()
                .map(|content| content.trim().to_string())
                .ok_or(EditError::NoChoices);
        }

        // Error bodies are not guaranteed to be JSON
        let message = serde_json::from_slice::<ChatResponse>(&body)
            .ok()
            .and_then(|parsed| parsed.error)
            .map(|error| error.message);

        match message {
            Some(message) => Err(EditError::Api(message)),
            None => Err(EditError::Unknown(status)),
        }
    }
}
