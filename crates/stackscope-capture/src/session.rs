//! Capture session: cancellation, state and the scroll origin.

use parking_lot::Mutex;
use stackscope_protocols::{CaptureDevice, CaptureError, ScrollPosition};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::state::CaptureState;

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    Completed,
    Cancelled,
    Failed,
}

#[derive(Debug)]
struct SessionInner {
    state: CaptureState,
    history: Vec<CaptureState>,
    origin: Option<ScrollPosition>,
    outcome: Option<SessionOutcome>,
}

/// One active capture.
///
/// Created before the page is measured and closed exactly once. Cancelling
/// the token resolves the pending device call as [`CaptureError::Cancelled`];
/// the scroll origin is restored on close regardless of outcome.
#[derive(Debug)]
pub struct CaptureSession {
    id: Uuid,
    token: CancellationToken,
    inner: Mutex<SessionInner>,
}

impl CaptureSession {
    pub fn new() -> Self {
        Self::with_token(CancellationToken::new())
    }

    /// Session cancelled together with `token`.
    pub fn with_token(token: CancellationToken) -> Self {
        Self {
            id: Uuid::new_v4(),
            token,
            inner: Mutex::new(SessionInner {
                state: CaptureState::Idle,
                history: vec![CaptureState::Idle],
                origin: None,
                outcome: None,
            }),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Handle for cancelling this session from another task.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn state(&self) -> CaptureState {
        self.inner.lock().state
    }

    /// Every state entered so far, starting with `Idle`.
    pub fn history(&self) -> Vec<CaptureState> {
        self.inner.lock().history.clone()
    }

    pub fn origin(&self) -> Option<ScrollPosition> {
        self.inner.lock().origin
    }

    pub fn outcome(&self) -> Option<SessionOutcome> {
        self.inner.lock().outcome
    }

    pub(crate) fn transition(&self, next: CaptureState) -> Result<(), CaptureError> {
        let mut inner = self.inner.lock();
        if !inner.state.can_transition_to(next) {
            return Err(CaptureError::Device(format!(
                "illegal capture transition {} -> {}",
                inner.state, next
            )));
        }
        debug!(session = %self.id, from = %inner.state, to = %next, "Capture state");
        inner.state = next;
        inner.history.push(next);
        Ok(())
    }

    /// Move to `Failed` unless already terminal.
    pub(crate) fn fail(&self) {
        let mut inner = self.inner.lock();
        if !inner.state.is_terminal() {
            debug!(session = %self.id, from = %inner.state, "Capture failed");
            inner.state = CaptureState::Failed;
            inner.history.push(CaptureState::Failed);
        }
    }

    /// Record the scroll position to restore on close. The first recorded
    /// origin wins.
    pub(crate) fn record_origin(&self, origin: ScrollPosition) {
        self.inner.lock().origin.get_or_insert(origin);
    }

    /// Run `fut` unless the session is cancelled first.
    pub(crate) async fn guard<T, F>(&self, fut: F) -> Result<T, CaptureError>
    where
        F: Future<Output = Result<T, CaptureError>>,
    {
        if self.token.is_cancelled() {
            return Err(CaptureError::Cancelled);
        }
        tokio::select! {
            biased;
            _ = self.token.cancelled() => Err(CaptureError::Cancelled),
            result = fut => result,
        }
    }

    /// Cancellable sleep.
    pub(crate) async fn pause(&self, millis: u64) -> Result<(), CaptureError> {
        self.guard(async {
            if millis > 0 {
                tokio::time::sleep(std::time::Duration::from_millis(millis)).await;
            }
            Ok(())
        })
        .await
    }

    /// Tear the session down: restore scroll and record the outcome.
    /// Later calls are no-ops.
    pub(crate) async fn close(&self, device: &dyn CaptureDevice, outcome: SessionOutcome) {
        let origin = {
            let mut inner = self.inner.lock();
            if inner.outcome.is_some() {
                return;
            }
            inner.outcome = Some(outcome);
            inner.origin
        };

        if let Some(origin) = origin {
            // Restoring ignores cancellation.
            if let Err(e) = device.scroll_to(origin).await {
                warn!(session = %self.id, "Failed to restore scroll position: {}", e);
            }
        }
        debug!(session = %self.id, ?outcome, "Capture session closed");
    }
}

impl Default for CaptureSession {
    fn default() -> Self {
        Self::new()
    }
}
