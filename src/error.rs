// src/error.rs
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};

/// Problems with the process configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("GROQ_API_KEY is not set; the AI provider is unavailable")]
    MissingCredential,

    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Failures talking to the inference provider.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("provider did not answer within {0} ms")]
    Timeout(u128),

    #[error("could not reach provider: {0}")]
    Transport(String),

    #[error("provider rate limit exceeded")]
    RateLimited,

    #[error("provider returned HTTP {status}")]
    Status { status: u16, body: String },

    #[error("provider response was unusable: {0}")]
    InvalidResponse(String),
}

impl UpstreamError {
    /// Whether a second attempt has a reasonable chance of succeeding.
    pub fn is_transient(&self) -> bool {
        match self {
            UpstreamError::Timeout(_) | UpstreamError::Transport(_) => true,
            UpstreamError::Status { status, .. } => matches!(status, 502..=504),
            UpstreamError::RateLimited | UpstreamError::InvalidResponse(_) => false,
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            UpstreamError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::BAD_GATEWAY,
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { field: &'static str, message: String },

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl AppError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        AppError::Validation {
            field,
            message: message.into(),
        }
    }
}

/// JSON body returned for every failed request.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, kind, message, field) = match &self {
            AppError::Validation { field, message } => {
                warn!(field = %field, "Rejected request: {}", message);
                (
                    StatusCode::BAD_REQUEST,
                    "validation_error",
                    message.clone(),
                    Some(field.to_string()),
                )
            }
            AppError::Upstream(err) => {
                if let UpstreamError::Status { status, body } = err {
                    error!(upstream_status = status, body = %body, "Provider call failed");
                } else {
                    error!("Provider call failed: {}", err);
                }
                (
                    err.status_code(),
                    "upstream_error",
                    "The AI provider could not answer. Please try again.".to_string(),
                    None,
                )
            }
            AppError::Config(err) => {
                error!("Configuration error: {}", err);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "config_error",
                    err.to_string(),
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: kind.to_string(),
            message,
            status: status.as_u16(),
            field,
        });

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_classification() {
        assert!(UpstreamError::Timeout(500).is_transient());
        assert!(UpstreamError::Transport("refused".into()).is_transient());
        assert!(
            UpstreamError::Status {
                status: 503,
                body: String::new()
            }
            .is_transient()
        );
        assert!(
            !UpstreamError::Status {
                status: 401,
                body: String::new()
            }
            .is_transient()
        );
        assert!(!UpstreamError::RateLimited.is_transient());
    }

    #[test]
    fn status_mapping() {
        let resp = AppError::validation("message", "Message cannot be empty").into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = AppError::from(UpstreamError::Timeout(100)).into_response();
        assert_eq!(resp.status(), StatusCode::GATEWAY_TIMEOUT);

        let resp = AppError::from(UpstreamError::RateLimited).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

        let resp = AppError::from(ConfigError::MissingCredential).into_response();
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
