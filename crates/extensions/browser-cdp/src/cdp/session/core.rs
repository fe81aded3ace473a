//! Page session: one attached target on the shared browser socket.

use std::sync::Arc;
use std::sync::atomic::AtomicU64;

use serde_json::{Value, json};
use tokio::sync::mpsc;
use tracing::debug;

use crate::cdp::client::{PendingMap, WsSink, send_command};
use crate::cdp::error::CdpError;
use crate::cdp::protocol::CdpResponse;

/// Commands sent through a session carry its `sessionId`; responses come
/// back over the client's socket and are routed by request id.
pub struct PageSession {
    pub(super) target_id: String,
    pub(super) session_id: String,
    pub(super) ws_tx: Arc<tokio::sync::Mutex<WsSink>>,
    pub(super) pending: PendingMap,
    pub(super) request_id: Arc<AtomicU64>,
    /// Held so the client's event routing for this session stays open.
    pub(super) _events: mpsc::UnboundedReceiver<CdpResponse>,
}

impl PageSession {
    pub(crate) fn new(
        target_id: String,
        session_id: String,
        ws_tx: Arc<tokio::sync::Mutex<WsSink>>,
        pending: PendingMap,
        request_id: Arc<AtomicU64>,
        events: mpsc::UnboundedReceiver<CdpResponse>,
    ) -> Self {
        Self {
            target_id,
            session_id,
            ws_tx,
            pending,
            request_id,
            _events: events,
        }
    }

    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub async fn call(&self, method: &str, params: Option<Value>) -> Result<Value, CdpError> {
        send_command(
            &self.ws_tx,
            &self.pending,
            &self.request_id,
            method,
            params,
            Some(&self.session_id),
        )
        .await
    }

    pub(crate) async fn enable_domains(&self) -> Result<(), CdpError> {
        for domain in ["Page", "Runtime"] {
            self.call(&format!("{}.enable", domain), None).await?;
        }
        debug!(session = %self.session_id, "Page and Runtime domains enabled");
        Ok(())
    }

    /// PNG of the current viewport, base64 encoded. An empty string means
    /// the browser produced no frame.
    pub async fn capture_viewport(&self) -> Result<String, CdpError> {
        let result = self
            .call(
                "Page.captureScreenshot",
                Some(json!({ "format": "png", "fromSurface": true })),
            )
            .await?;

        match &result["data"] {
            Value::String(data) => Ok(data.clone()),
            _ => Err(CdpError::InvalidResponse(
                "Page.captureScreenshot returned no data".to_string(),
            )),
        }
    }
}
