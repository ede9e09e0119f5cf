use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Clone, Debug)]
pub struct InferenceConfig {
    /// Full URL of the chat endpoint, e.g. `http://localhost:11434/api/chat`.
    pub chat_url: String,
    pub model: String,
    pub max_error_body_bytes: usize,
}

impl InferenceConfig {
    pub fn from_env() -> Self {
        let chat_url = std::env::var("OLLAMA_CHAT_URL")
            .unwrap_or_else(|_| "http://localhost:11434/api/chat".to_string());

        let model = std::env::var("OLLAMA_MODEL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| "llama3:latest".to_string());

        let max_error_body_bytes = std::env::var("OLLAMA_MAX_ERROR_BODY_BYTES")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(8 * 1024);

        Self {
            chat_url,
            model,
            max_error_body_bytes,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("invalid response JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("upstream returned error: status={status} body={body}")]
    Upstream { status: StatusCode, body: String },
}

/// Client for a locally hosted model server speaking the Ollama chat protocol.
///
/// One call is one POST: there is no retry and no timeout, the call waits until
/// the model answers or the transport fails.
#[derive(Clone)]
pub struct InferenceClient {
    config: InferenceConfig,
    http: reqwest::Client,
}

impl InferenceClient {
    pub fn new(config: InferenceConfig) -> Result<Self, InferenceError> {
        let http = reqwest::Client::builder()
            .user_agent("study-notes/notes-gateway")
            .build()?;
        Ok(Self { config, http })
    }

    /// Send `prompt` as a one-turn, non-streamed conversation.
    pub async fn chat(&self, prompt: &str) -> Result<InferenceReply, InferenceError> {
        let request = ChatRequest::single_turn(&self.config.model, prompt);
        debug!(
            url = %self.config.chat_url,
            model = %self.config.model,
            prompt_chars = prompt.chars().count(),
            "sending chat request"
        );
        let resp = self
            .http
            .post(&self.config.chat_url)
            .json(&request)
            .send()
            .await?;
        Self::parse_json_response(resp, self.config.max_error_body_bytes).await
    }

    async fn parse_json_response<T: for<'de> Deserialize<'de>>(
        resp: reqwest::Response,
        max_error_body_bytes: usize,
    ) -> Result<T, InferenceError> {
        let status = resp.status();
        if status.is_success() {
            // Decoded by hand so a malformed body is InvalidJson, not a transport error.
            let bytes = resp.bytes().await?;
            return Ok(serde_json::from_slice(&bytes)?);
        }
        let body = read_limited_text(resp, max_error_body_bytes).await;
        Err(InferenceError::Upstream { status, body })
    }
}

/// Error body of a failed call, trimmed to at most `max_bytes` on a char boundary.
async fn read_limited_text(resp: reqwest::Response, max_bytes: usize) -> String {
    match resp.bytes().await {
        Ok(b) => truncate_on_char_boundary(String::from_utf8_lossy(&b).into_owned(), max_bytes),
        Err(e) => {
            warn!(error = %e, "failed to read upstream error body");
            "<failed to read error body>".to_string()
        }
    }
}

fn truncate_on_char_boundary(mut text: String, max_bytes: usize) -> String {
    if text.len() > max_bytes {
        let mut cut = max_bytes;
        while !text.is_char_boundary(cut) {
            cut -= 1;
        }
        text.truncate(cut);
    }
    text
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub stream: bool,
    pub messages: Vec<Message>,
}

impl ChatRequest {
    pub fn single_turn(model: &str, prompt: &str) -> Self {
        Self {
            model: model.to_string(),
            stream: false,
            messages: vec![Message {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        }
    }
}

/// Raw reply as sent by the model server. Chat endpoints fill `message.content`,
/// completion endpoints fill `response`; use [`InferenceReply::shape`] to resolve it.
/// Fields are read leniently: a mistyped field in one shape leaves the other usable.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct InferenceReply(serde_json::Value);

/// The reply text, tagged with the shape it was found in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyShape {
    Chat(String),
    Completion(String),
}

impl ReplyShape {
    pub fn into_text(self) -> String {
        match self {
            ReplyShape::Chat(text) | ReplyShape::Completion(text) => text,
        }
    }
}

impl InferenceReply {
    /// Resolve the reply into a single shape. The chat field wins over the flat
    /// completion field; blank content counts as absent. `None` means the model
    /// produced nothing usable.
    pub fn shape(&self) -> Option<ReplyShape> {
        let text_at = |pointer: &str| {
            self.0
                .pointer(pointer)
                .and_then(serde_json::Value::as_str)
                .filter(|s| !s.trim().is_empty())
                .map(str::to_string)
        };
        text_at("/message/content")
            .map(ReplyShape::Chat)
            .or_else(|| text_at("/response").map(ReplyShape::Completion))
    }

    pub fn summary(&self) -> Option<String> {
        self.shape().map(ReplyShape::into_text)
    }
}
