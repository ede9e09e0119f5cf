use std::future::Future;

use tracing::{debug, error};

use notes_common::api::{GatewayResponse, UploadRequest};

use crate::error::ClientError;

/// Longest slice of a raw error body shown to the user.
const RAW_ERROR_PREVIEW_CHARS: usize = 200;

/// Turns extracted text into a summary.
pub trait Summarizer {
    fn summarize(&self, text: &str) -> impl Future<Output = Result<String, ClientError>> + Send;
}

/// HTTP client for the gateway's `POST /api/summarize`.
#[derive(Clone)]
pub struct GatewayClient {
    http: reqwest::Client,
    summarize_url: String,
}

impl GatewayClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .user_agent("study-notes")
            .build()
            .map_err(|e| ClientError::RequestFailed(e.to_string()))?;
        Ok(Self {
            http,
            summarize_url: format!("{}/api/summarize", base_url.trim_end_matches('/')),
        })
    }
}

impl Summarizer for GatewayClient {
    async fn summarize(&self, text: &str) -> Result<String, ClientError> {
        let resp = self
            .http
            .post(&self.summarize_url)
            .json(&UploadRequest::new(text))
            .send()
            .await
            .map_err(|e| ClientError::RequestFailed(format!("Request failed: {e}")))?;

        let status = resp.status();
        debug!(%status, "gateway responded");
        let raw = resp
            .text()
            .await
            .map_err(|e| ClientError::RequestFailed(format!("Failed to read response: {e}")))?;

        interpret_response(status.is_success(), &raw)
    }
}

fn interpret_response(success: bool, raw: &str) -> Result<String, ClientError> {
    let parsed = serde_json::from_str::<GatewayResponse>(raw);

    if !success {
        error!(raw = %raw, "gateway returned an error status");
        let message = match parsed {
            Ok(GatewayResponse::Failure(body)) if !body.message.trim().is_empty() => body.message,
            _ => format!(
                "Server error: {}",
                raw.chars().take(RAW_ERROR_PREVIEW_CHARS).collect::<String>()
            ),
        };
        return Err(ClientError::RequestFailed(message));
    }

    match parsed {
        Ok(GatewayResponse::Success { summary }) => Ok(summary),
        Ok(GatewayResponse::Failure(body)) => {
            let message = if body.message.trim().is_empty() {
                "Unexpected error".to_string()
            } else {
                body.message
            };
            Err(ClientError::RequestFailed(message))
        }
        Err(e) => Err(ClientError::RequestFailed(format!(
            "Invalid response from server: {e}"
        ))),
    }
}
