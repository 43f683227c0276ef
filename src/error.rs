//! Error types for the tool server.

use thiserror::Error;

/// A request line that could not be turned into a [`Request`](crate::protocol::Request).
///
/// The response to a decode failure always carries `id: null`.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid UTF-8 in request line: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("request must be a JSON object, got {0}")]
    NotAnObject(&'static str),
}

/// Failure of a single tool invocation.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("invalid params: {0}")]
    InvalidParams(String),

    #[error("failed to fetch {url}: {}", friendly_network_error(.source))]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to save file {path}: {source}")]
    Save {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("tool {0} panicked")]
    Panicked(String),
}

fn friendly_network_error(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        return "request timed out".to_string();
    }
    if e.is_connect() {
        return format!("could not connect ({e})");
    }
    if e.is_builder() {
        return format!("invalid request ({e})");
    }
    if e.is_decode() || e.is_body() {
        return format!("could not read response body ({e})");
    }
    e.to_string()
}
