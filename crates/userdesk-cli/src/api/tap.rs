//! Response/error tap
//!
//! Observes the outcome of each request and logs it, tagged with the
//! request path. It only reads the outcome; the caller gets it back exactly
//! as it was produced.

use crate::api::error::{ApiError, Result};
use reqwest::{Method, StatusCode};
use tracing::{debug, error};

/// A response that made it back with a 2xx status
#[derive(Debug, Clone)]
pub struct Reply {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

/// Log the outcome of `method path` and hand it back untouched
pub fn observe(method: &Method, path: &str, outcome: Result<Reply>) -> Result<Reply> {
    match &outcome {
        Ok(reply) => {
            debug!(
                method = %method,
                path = %path,
                status = reply.status.as_u16(),
                bytes = reply.body.len(),
                "API response"
            );
        }
        Err(err) => log_failure(method, path, err),
    }
    outcome
}

/// Log a failure; structured bodies are logged as JSON, anything else as text
pub fn log_failure(method: &Method, path: &str, err: &ApiError) {
    match err {
        ApiError::Server { status, detail, .. } => match detail.json() {
            Some(body) => error!(
                method = %method,
                path = %path,
                status = status.as_u16(),
                response = %body,
                "API error"
            ),
            None => error!(
                method = %method,
                path = %path,
                status = status.as_u16(),
                message = %detail,
                "API error"
            ),
        },
        other => error!(
            method = %method,
            path = %path,
            message = %other,
            "API error"
        ),
    }
}
