//! BrowserManager: connection, tabs, snapshots and capture devices.

use std::sync::Arc;
use std::time::Duration;

use stackscope_config::BrowserConfig;
use stackscope_extract::DomSnapshot;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::BrowserError;
use crate::cdp::{CdpClient, CdpError, PageSession};
use crate::device::CdpCaptureDevice;
use crate::load_retry::retry_after_load;

/// One open tab.
pub struct BrowserPage {
    session: Arc<PageSession>,
    url: String,
}

impl BrowserPage {
    /// URL that was requested for this tab.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn session(&self) -> &Arc<PageSession> {
        &self.session
    }
}

/// Manages the browser connection and the tabs opened through it.
pub struct BrowserManager {
    config: BrowserConfig,
    client: RwLock<Option<Arc<CdpClient>>>,
}

impl BrowserManager {
    pub fn new(config: BrowserConfig) -> Self {
        Self {
            config,
            client: RwLock::new(None),
        }
    }

    pub fn config(&self) -> &BrowserConfig {
        &self.config
    }

    fn navigation_timeout(&self) -> Duration {
        Duration::from_secs(self.config.navigation_timeout_seconds)
    }

    /// Connect to the configured endpoint; a no-op when already connected.
    pub async fn connect(&self) -> Result<(), BrowserError> {
        if self.client.read().await.is_some() {
            return Ok(());
        }

        let client = CdpClient::connect(&self.config.endpoint).await?;
        *self.client.write().await = Some(Arc::new(client));

        info!("Connected to Chrome at {}", self.config.endpoint);
        Ok(())
    }

    async fn client(&self) -> Result<Arc<CdpClient>, BrowserError> {
        self.client
            .read()
            .await
            .clone()
            .ok_or(BrowserError::NotConnected)
    }

    /// Open a new tab on `url` and wait for it to load and settle.
    pub async fn open(&self, url: &str) -> Result<BrowserPage, BrowserError> {
        self.connect().await?;
        let client = self.client().await?;

        let session = client.new_page().await?;
        if let Err(e) = session.navigate(url, self.navigation_timeout()).await {
            if let Err(close_err) = client.close_page(&session).await {
                warn!("Failed to close tab after navigation error: {}", close_err);
            }
            return Err(match e {
                CdpError::Timeout(msg) => {
                    BrowserError::NavigationFailed(format!("{}: {}", url, msg))
                }
                other => other.into(),
            });
        }

        if self.config.settle_after_load_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.config.settle_after_load_ms)).await;
        }

        debug!("Opened {}", url);
        Ok(BrowserPage {
            session: Arc::new(session),
            url: url.to_string(),
        })
    }

    /// Serialize the page's DOM for extraction.
    ///
    /// A failed snapshot is retried once after the page finishes loading;
    /// a second failure is [`BrowserError::PageUnreachable`].
    pub async fn snapshot(&self, page: &BrowserPage) -> Result<DomSnapshot, BrowserError> {
        let session = &page.session;
        let max_elements = self.config.max_snapshot_elements;
        let timeout = self.navigation_timeout();
        retry_after_load(
            move || session.snapshot(max_elements),
            move || session.wait_for_load(timeout),
        )
        .await
        .map_err(|e| BrowserError::PageUnreachable(e.to_string()))
    }

    /// Capture device bound to the page.
    pub fn capture_device(&self, page: &BrowserPage) -> CdpCaptureDevice {
        CdpCaptureDevice::new(page.session.clone(), self.navigation_timeout())
    }

    /// Close a tab.
    pub async fn close_page(&self, page: BrowserPage) -> Result<(), BrowserError> {
        let client = self.client().await?;
        client.close_page(&page.session).await?;
        debug!("Closed page {}", page.url);
        Ok(())
    }

    /// Drop the browser connection.
    pub async fn close(&self) {
        if self.client.write().await.take().is_some() {
            info!("Browser connection closed");
        }
    }
}
