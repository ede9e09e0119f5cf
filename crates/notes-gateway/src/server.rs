//! HTTP surface of the gateway.
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/api/summarize` | `{ text }` in, `{ summary }` or `{ error, message, details? }` out |
//! | `GET`  | `/health` | Liveness probe |

use std::any::Any;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, DefaultBodyLimit, State},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use notes_common::api::{GatewayResponse, UploadRequest};
use notes_common::inference::InferenceClient;

use crate::config::Config;
use crate::error::GatewayError;

#[derive(Clone)]
pub struct AppState {
    inference: Arc<InferenceClient>,
}

impl AppState {
    pub fn new(inference: Arc<InferenceClient>) -> Self {
        Self { inference }
    }
}

pub fn router(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/api/summarize", post(handle_summarize))
        .route("/health", get(handle_health))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind to `config.bind` and serve until the process is terminated.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let inference = Arc::new(InferenceClient::new(config.inference.clone())?);
    let app = router(AppState::new(inference), config.max_body_bytes);

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    info!(addr = %listener.local_addr()?, "gateway listening");
    axum::serve(listener, app).await?;
    Ok(())
}

/// Fixed instruction wrapped around the extracted text. The text is embedded verbatim.
pub fn study_notes_prompt(text: &str) -> String {
    format!(
        "Summarize the following into concise study notes with bullet points and bold keywords:\n\n{text}"
    )
}

async fn handle_summarize(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<GatewayResponse>, GatewayError> {
    let body = body.map_err(|rejection| {
        warn!(status = %rejection.status(), "request body rejected");
        GatewayError::Internal(rejection.body_text())
    })?;
    info!(body_bytes = body.len(), "summarize called");

    let request: UploadRequest =
        serde_json::from_slice(&body).map_err(|e| GatewayError::Internal(e.to_string()))?;
    let text = request.text.unwrap_or_default();
    if text.trim().is_empty() {
        warn!("rejecting blank text");
        return Err(GatewayError::EmptyInput);
    }

    let prompt = study_notes_prompt(&text);
    let reply = state.inference.chat(&prompt).await?;
    let summary = reply.summary().ok_or_else(|| {
        warn!("inference reply carried no content");
        GatewayError::EmptyUpstreamResult
    })?;

    info!(summary_chars = summary.chars().count(), "summary ready");
    Ok(Json(GatewayResponse::success(summary)))
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        String::new()
    };
    tracing::error!(panic = %message, "handler panicked");
    GatewayError::Internal(message).into_response()
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
