//! Browser manager error type.

use thiserror::Error;

use crate::cdp::CdpError;

/// Browser manager errors.
#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    /// The page stopped answering, even after waiting for it to load.
    #[error("Could not connect to page. Please refresh the page and try again. ({0})")]
    PageUnreachable(String),

    #[error("Browser protocol error: {0}")]
    Protocol(String),

    #[error("Browser not connected")]
    NotConnected,
}

impl From<CdpError> for BrowserError {
    fn from(e: CdpError) -> Self {
        match e {
            CdpError::ConnectionFailed(msg) | CdpError::ChromeNotAvailable(msg) => {
                BrowserError::ConnectionFailed(msg)
            }
            CdpError::NavigationFailed(msg) => BrowserError::NavigationFailed(msg),
            CdpError::SessionClosed => BrowserError::NotConnected,
            other => BrowserError::Protocol(other.to_string()),
        }
    }
}
