//! Error types for the taskctl CLI

use reqwest::StatusCode;
use thiserror::Error;

/// Result type alias for taskctl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
#[allow(dead_code)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Interactive prompt error: {0}")]
    Dialoguer(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Operation failed: {0}")]
    Other(String),
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Dialoguer(err.to_string())
    }
}

/// API-related errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Not logged in. Run `taskctl login` to start a session.")]
    Unauthenticated,

    #[error("Session expired and could not be renewed. Run `taskctl login` again.")]
    AuthenticationFailed,

    #[error("No refresh credential stored. Run `taskctl login` to start a session.")]
    NoRefreshCredential,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::NetworkError("Request timed out".to_string())
        } else if err.is_connect() {
            ApiError::NetworkError("Failed to connect to API".to_string())
        } else {
            ApiError::NetworkError(err.to_string())
        }
    }
}

impl ApiError {
    /// Classify a terminal non-2xx response body into the error taxonomy.
    ///
    /// 422 bodies carry a structured field-error list which is flattened to
    /// `field: message[, field: message...]` here, the last point before the
    /// error leaves the authenticated boundary. Everything else becomes a
    /// `ServerError` preferring the backend-provided `detail`/`message`.
    pub(crate) fn from_response(status: StatusCode, body: &str) -> ApiError {
        if status == StatusCode::UNPROCESSABLE_ENTITY {
            return ApiError::ValidationError(flatten_validation_detail(body));
        }

        ApiError::ServerError(server_error_message(status, body))
    }
}

/// Flatten a 422 `detail` payload into a single human-readable message.
///
/// The backend emits either `{"detail": [{"loc": [..., field], "msg": ...}]}`
/// or `{"detail": "plain message"}`; unrecognized shapes fall back to a
/// generic message rather than leaking raw JSON.
fn flatten_validation_detail(body: &str) -> String {
    let parsed: serde_json::Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(_) => return "invalid data provided".to_string(),
    };

    match parsed.get("detail") {
        Some(serde_json::Value::Array(entries)) => {
            let messages: Vec<String> = entries
                .iter()
                .map(|entry| {
                    let field = entry
                        .get("loc")
                        .and_then(|loc| loc.as_array())
                        .and_then(|loc| loc.last())
                        .map(|f| match f.as_str() {
                            Some(s) => s.to_string(),
                            None => f.to_string(),
                        })
                        .unwrap_or_else(|| "unknown".to_string());
                    let msg = entry
                        .get("msg")
                        .and_then(|m| m.as_str())
                        .unwrap_or("invalid value");
                    format!("{}: {}", field, msg)
                })
                .collect();
            if messages.is_empty() {
                "invalid data provided".to_string()
            } else {
                messages.join(", ")
            }
        }
        Some(serde_json::Value::String(detail)) => detail.clone(),
        _ => "invalid data provided".to_string(),
    }
}

/// Extract a server error message, preferring backend `detail`/`message`.
fn server_error_message(status: StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["detail", "message"] {
            if let Some(msg) = parsed.get(key).and_then(|v| v.as_str()) {
                return msg.to_string();
            }
        }
    }
    format!("server error {}", status.as_u16())
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found.")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
