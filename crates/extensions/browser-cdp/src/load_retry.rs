//! One "ensure loaded" retry around page calls.

use std::future::Future;

use tracing::debug;

use crate::cdp::CdpError;

/// Run `call`; if it fails, wait for the page to finish loading and run it
/// once more. The second result (or the wait's error) is returned as is.
pub(crate) async fn retry_after_load<T, C, CF, W, WF>(
    mut call: C,
    wait_for_load: W,
) -> Result<T, CdpError>
where
    C: FnMut() -> CF,
    CF: Future<Output = Result<T, CdpError>>,
    W: FnOnce() -> WF,
    WF: Future<Output = Result<(), CdpError>>,
{
    match call().await {
        Ok(value) => Ok(value),
        Err(first) => {
            debug!("Page call failed ({}), waiting for load before retrying", first);
            wait_for_load().await?;
            call().await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_success_skips_wait() {
        let waits = AtomicUsize::new(0);
        let waits_ref = &waits;
        let result = retry_after_load(
            || async { Ok::<_, CdpError>(1) },
            move || async move {
                waits_ref.fetch_add(1, Ordering::SeqCst);
                Ok(())
            },
        )
        .await;
        assert_eq!(result.unwrap(), 1);
        assert_eq!(waits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_retries_once_after_load() {
        let calls = AtomicUsize::new(0);
        let calls_ref = &calls;
        let result = retry_after_load(
            move || async move {
                if calls_ref.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err(CdpError::SessionClosed)
                } else {
                    Ok("loaded")
                }
            },
            || async { Ok(()) },
        )
        .await;
        assert_eq!(result.unwrap(), "loaded");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_second_failure_is_returned() {
        let calls = AtomicUsize::new(0);
        let calls_ref = &calls;
        let result: Result<(), CdpError> = retry_after_load(
            move || async move {
                calls_ref.fetch_add(1, Ordering::SeqCst);
                Err(CdpError::JavaScript("document is not ready".to_string()))
            },
            || async { Ok(()) },
        )
        .await;
        assert!(matches!(result, Err(CdpError::JavaScript(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_wait_failure_stops_retry() {
        let calls = AtomicUsize::new(0);
        let calls_ref = &calls;
        let result: Result<(), CdpError> = retry_after_load(
            move || async move {
                calls_ref.fetch_add(1, Ordering::SeqCst);
                Err(CdpError::SessionClosed)
            },
            || async { Err(CdpError::Timeout("page load".to_string())) },
        )
        .await;
        assert!(matches!(result, Err(CdpError::Timeout(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
