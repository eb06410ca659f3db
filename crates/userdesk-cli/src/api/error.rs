//! Errors returned by [`ApiClient`](crate::api::ApiClient) operations
//!
//! Two families matter to callers: transport failures (no response arrived)
//! and server failures (a non-2xx response arrived). Neither is retried or
//! reinterpreted; the status code and body are passed through as received.

use reqwest::StatusCode;
use serde_json::Value;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for API operations
pub type Result<T> = std::result::Result<T, ApiError>;

/// Failure of a single API call
#[derive(Error, Debug)]
pub enum ApiError {
    /// No response was received: connection refused, DNS failure, timeout
    #[error("{method} {path} failed before a response arrived: {source}")]
    Transport {
        method: String,
        path: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-2xx status
    #[error("{method} {path} returned {status}: {detail}")]
    Server {
        method: String,
        path: String,
        status: StatusCode,
        detail: ServerErrorDetail,
    },

    /// A 2xx response body did not match the expected shape
    #[error("Could not decode response of {method} {path}: {source}")]
    Decode {
        method: String,
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// The request payload could not be encoded
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// A profile attachment could not be read from disk
    #[error("Failed to read attachment '{}': {source}", path.display())]
    Attachment {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The client itself could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    Setup(String),
}

impl ApiError {
    /// Create an invalid payload error
    pub fn invalid_payload(msg: impl Into<String>) -> Self {
        Self::InvalidPayload(msg.into())
    }

    /// Create a client setup error
    pub fn setup(msg: impl Into<String>) -> Self {
        Self::Setup(msg.into())
    }

    /// HTTP status of a server error, `None` for every other kind
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Body the server sent along with an error status
    pub fn detail(&self) -> Option<&ServerErrorDetail> {
        match self {
            ApiError::Server { detail, .. } => Some(detail),
            _ => None,
        }
    }

    /// Request path the error belongs to, when the request was built
    pub fn path(&self) -> Option<&str> {
        match self {
            ApiError::Transport { path, .. }
            | ApiError::Server { path, .. }
            | ApiError::Decode { path, .. } => Some(path),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport { .. })
    }
}

/// Body of an error response
///
/// The users backend answers with one of several shapes:
/// `{"error": "..."}`, `{"error": ["field: msg", ...]}`,
/// `{"error_code": "...", "message": "...", "detail": "..."}` or a plain
/// field-to-message map. Anything that is not JSON is kept as text.
#[derive(Debug, Clone, PartialEq)]
pub enum ServerErrorDetail {
    Json(Value),
    Text(String),
    Empty,
}

impl ServerErrorDetail {
    /// Classify a raw response body
    pub fn from_body(body: &[u8]) -> Self {
        if body.iter().all(u8::is_ascii_whitespace) {
            return ServerErrorDetail::Empty;
        }

        match serde_json::from_slice::<Value>(body) {
            Ok(value) => ServerErrorDetail::Json(value),
            Err(_) => ServerErrorDetail::Text(String::from_utf8_lossy(body).into_owned()),
        }
    }

    /// Structured body, if the server sent JSON
    pub fn json(&self) -> Option<&Value> {
        match self {
            ServerErrorDetail::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Business error code such as `USER_001`, when present
    pub fn error_code(&self) -> Option<&str> {
        self.json()?.get("error_code")?.as_str()
    }

    /// The most specific human-readable message in the body
    pub fn message(&self) -> String {
        match self {
            ServerErrorDetail::Json(value) => json_message(value),
            ServerErrorDetail::Text(text) => text.trim().to_string(),
            ServerErrorDetail::Empty => "no response body".to_string(),
        }
    }
}

fn json_message(value: &Value) -> String {
    let Some(object) = value.as_object() else {
        return value.to_string();
    };

    for key in ["detail", "message", "error"] {
        match object.get(key) {
            Some(Value::String(text)) if !text.is_empty() => return text.clone(),
            Some(Value::Array(items)) if !items.is_empty() => {
                return items
                    .iter()
                    .map(|item| match item {
                        Value::String(text) => text.clone(),
                        other => other.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join("; ");
            }
            _ => {}
        }
    }

    // Field-to-message map from validation failures
    object
        .iter()
        .map(|(field, msg)| match msg {
            Value::String(text) => format!("{field}: {text}"),
            other => format!("{field}: {other}"),
        })
        .collect::<Vec<_>>()
        .join("; ")
}

impl fmt::Display for ServerErrorDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}
