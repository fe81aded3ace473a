//! Errors raised while talking to the browser.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CdpError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Nothing answered on the discovery endpoint.
    #[error("No browser answering at {0}; start Chrome with --remote-debugging-port=9222 or pass --endpoint")]
    ChromeNotAvailable(String),

    #[error("WebSocket error: {0}")]
    WebSocket(String),

    /// Error object returned for one command.
    #[error("{method} failed: {message} (code {code})")]
    Protocol {
        method: String,
        code: i64,
        message: String,
    },

    #[error("Malformed CDP payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Endpoint discovery failed: {0}")]
    Http(String),

    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    /// Exception thrown by an evaluated page script.
    #[error("JavaScript error: {0}")]
    JavaScript(String),

    #[error("Timed out: {0}")]
    Timeout(String),

    #[error("Session closed")]
    SessionClosed,

    /// A result was missing a field every reply to that command carries.
    #[error("Unexpected reply: {0}")]
    InvalidResponse(String),
}

impl From<tokio_tungstenite::tungstenite::Error> for CdpError {
    fn from(e: tokio_tungstenite::tungstenite::Error) -> Self {
        CdpError::WebSocket(e.to_string())
    }
}

impl From<reqwest::Error> for CdpError {
    fn from(e: reqwest::Error) -> Self {
        CdpError::Http(e.to_string())
    }
}

impl From<url::ParseError> for CdpError {
    fn from(e: url::ParseError) -> Self {
        CdpError::ConnectionFailed(format!("Invalid endpoint URL: {}", e))
    }
}
