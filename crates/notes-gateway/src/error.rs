use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use notes_common::api::GatewayResponse;
use notes_common::inference::InferenceError;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),

    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// Failure of a single `/api/summarize` call. Every variant renders as the
/// `{ error: true, message, details? }` body.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("No text found to summarize.")]
    EmptyInput,

    #[error("Inference service responded with an error.")]
    Upstream { details: String },

    #[error("Inference service returned an empty summary.")]
    EmptyUpstreamResult,

    #[error("{}", internal_message(.0))]
    Internal(String),
}

fn internal_message(message: &str) -> &str {
    if message.trim().is_empty() {
        "Unexpected server error."
    } else {
        message
    }
}

impl GatewayError {
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::EmptyInput => StatusCode::BAD_REQUEST,
            GatewayError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            GatewayError::EmptyUpstreamResult | GatewayError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn details(&self) -> Option<String> {
        match self {
            GatewayError::Upstream { details } => Some(details.clone()),
            _ => None,
        }
    }
}

impl From<InferenceError> for GatewayError {
    fn from(err: InferenceError) -> Self {
        match err {
            InferenceError::Request(e) => {
                error!(error = %e, "inference service unreachable");
                GatewayError::Upstream {
                    details: e.to_string(),
                }
            }
            InferenceError::Upstream { status, body } => {
                error!(%status, body = %body, "inference service error");
                GatewayError::Upstream { details: body }
            }
            InferenceError::InvalidJson(e) => GatewayError::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let body = GatewayResponse::failure(self.to_string(), self.details());
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_per_kind() {
        assert_eq!(GatewayError::EmptyInput.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            GatewayError::Upstream {
                details: String::new()
            }
            .status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            GatewayError::EmptyUpstreamResult.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            GatewayError::Internal("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn blank_internal_message_falls_back() {
        assert_eq!(
            GatewayError::Internal("  ".into()).to_string(),
            "Unexpected server error."
        );
        assert_eq!(GatewayError::Internal("disk on fire".into()).to_string(), "disk on fire");
    }

    #[test]
    fn only_upstream_carries_details() {
        let err = GatewayError::Upstream {
            details: "model not found".into(),
        };
        assert_eq!(err.details().as_deref(), Some("model not found"));
        assert!(GatewayError::EmptyUpstreamResult.details().is_none());
    }
}
