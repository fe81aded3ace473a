//! Retry policy for viewport captures.

use std::time::Duration;

use stackscope_config::CaptureConfig;

/// Fixed attempt count with linearly growing backoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub base_backoff: Duration,
}

impl RetryPolicy {
    pub fn new(attempts: u32, base_backoff: Duration) -> Self {
        Self {
            attempts: attempts.max(1),
            base_backoff,
        }
    }

    pub fn from_config(config: &CaptureConfig) -> Self {
        Self::new(
            config.capture_retries,
            Duration::from_millis(config.retry_backoff_ms),
        )
    }

    /// Delay after failed attempt `attempt` (1-based), or `None` when no
    /// attempts remain.
    pub fn backoff(&self, attempt: u32) -> Option<Duration> {
        (attempt < self.attempts).then(|| self.base_backoff * attempt)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&CaptureConfig::default())
    }
}
