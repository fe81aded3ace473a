//! `screenshot` command.

use std::path::Path;

use anyhow::{Context, Result};
use stackscope_browser_cdp::BrowserManager;
use stackscope_capture::{CaptureSession, FullPageCapturer, decode_data_url, encode_for_path};
use stackscope_config::Config;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::cmd_analyze::close_quietly;

/// Capture `url` as one full-page image.
pub(crate) async fn run_screenshot(
    config: &Config,
    url: &str,
    output: &Path,
    token: CancellationToken,
) -> Result<()> {
    let manager = BrowserManager::new(config.browser.clone());
    let page = manager
        .open(url)
        .await
        .with_context(|| format!("Failed to open {}", url))?;

    let device = manager.capture_device(&page);
    let session = CaptureSession::with_token(token);
    let result = FullPageCapturer::new(config.capture.clone())
        .capture(&device, &session)
        .await;
    close_quietly(&manager, page).await;
    manager.close().await;

    let image = result?;
    let bytes = encode_for_path(
        &decode_data_url(&image.data_url)?,
        output,
        config.capture.jpeg_quality,
    )?;
    std::fs::write(output, &bytes)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    info!(
        width = image.width,
        height = image.height,
        tiles = image.tiles,
        "Wrote {}",
        output.display()
    );
    Ok(())
}
