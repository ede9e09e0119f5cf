use serde::{Deserialize, Serialize};

/// Body of `POST /api/summarize`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UploadRequest {
    /// Text extracted from the uploaded PDF. A missing field is treated like blank text.
    #[serde(default)]
    pub text: Option<String>,
}

impl UploadRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }
}

/// Reply of `POST /api/summarize`: either a summary or an error, never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GatewayResponse {
    Failure(ErrorBody),
    Success { summary: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Always `true`.
    pub error: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl GatewayResponse {
    pub fn success(summary: impl Into<String>) -> Self {
        Self::Success {
            summary: summary.into(),
        }
    }

    pub fn failure(message: impl Into<String>, details: Option<String>) -> Self {
        Self::Failure(ErrorBody {
            error: true,
            message: message.into(),
            details,
        })
    }
}
