use std::net::SocketAddr;

use notes_common::inference::InferenceConfig;

use crate::error::ConfigError;

const DEFAULT_BIND: &str = "127.0.0.1:3000";
const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Gateway configuration loaded explicitly from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP listener binds to.
    pub bind: SocketAddr,
    /// Largest accepted request body. Extracted text of a long PDF easily passes axum's 2 MiB default.
    pub max_body_bytes: usize,
    pub inference: InferenceConfig,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional:
    /// - `GATEWAY_BIND`: listen address (default `127.0.0.1:3000`)
    /// - `GATEWAY_MAX_BODY_BYTES`: request body limit (default 10 MiB)
    /// - `OLLAMA_CHAT_URL`, `OLLAMA_MODEL`, `OLLAMA_MAX_ERROR_BODY_BYTES`: see [`InferenceConfig::from_env`]
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind = parse_var("GATEWAY_BIND", DEFAULT_BIND.parse().ok())?;
        let max_body_bytes = parse_var("GATEWAY_MAX_BODY_BYTES", Some(DEFAULT_MAX_BODY_BYTES))?;
        if max_body_bytes == 0 {
            return Err(ConfigError::Invalid {
                var: "GATEWAY_MAX_BODY_BYTES",
                value: "0".to_string(),
            });
        }

        Ok(Self {
            bind,
            max_body_bytes,
            inference: InferenceConfig::from_env(),
        })
    }
}

fn parse_var<T: std::str::FromStr>(var: &'static str, default: Option<T>) -> Result<T, ConfigError> {
    match std::env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid { var, value: raw }),
        Err(_) => default.ok_or(ConfigError::Missing(var)),
    }
}
