//! `analyze` and `signals` commands.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use stackscope_browser_cdp::{BrowserManager, BrowserPage};
use stackscope_capture::CaptureSession;
use stackscope_config::Config;
use stackscope_core::Analyzer;
use stackscope_extract::{DomSnapshot, PageSignalExtractor};
use stackscope_protocols::{CaptureDevice, ProviderError};
use stackscope_provider_openrouter::OpenRouterProvider;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Print `content` or write it to `output`.
pub(crate) fn write_output(content: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}

/// Open `url` and snapshot it.
pub(crate) async fn open_and_snapshot(
    manager: &BrowserManager,
    url: &str,
) -> Result<(BrowserPage, DomSnapshot)> {
    let page = manager
        .open(url)
        .await
        .with_context(|| format!("Failed to open {}", url))?;
    match manager.snapshot(&page).await {
        Ok(snapshot) => Ok((page, snapshot)),
        Err(e) => {
            close_quietly(manager, page).await;
            Err(e.into())
        }
    }
}

pub(crate) async fn close_quietly(manager: &BrowserManager, page: BrowserPage) {
    if let Err(e) = manager.close_page(page).await {
        warn!("Failed to close tab: {}", e);
    }
}

/// Full analysis; prints the JSON report.
pub(crate) async fn run_analyze(
    config: &Config,
    url: &str,
    output: Option<&Path>,
    token: CancellationToken,
) -> Result<()> {
    if config.provider.resolved_api_key().is_none() {
        bail!(ProviderError::MissingApiKey);
    }

    let manager = BrowserManager::new(config.browser.clone());
    let (page, snapshot) = open_and_snapshot(&manager, url).await?;

    let provider = Arc::new(OpenRouterProvider::new(config.provider.clone()));
    let analyzer = Analyzer::new(config, provider);
    let device = manager.capture_device(&page);
    let session = CaptureSession::with_token(token);

    let result = analyzer
        .analyze(&snapshot, Some(&device as &dyn CaptureDevice), &session)
        .await;
    if session.is_cancelled() {
        warn!("Capture was cancelled; the report has no screenshot");
    }
    close_quietly(&manager, page).await;
    manager.close().await;

    let report = result?;
    write_output(&serde_json::to_string_pretty(&report)?, output)
}

/// Extraction only; prints the signal bundle.
pub(crate) async fn run_signals(config: &Config, url: &str, output: Option<&Path>) -> Result<()> {
    let manager = BrowserManager::new(config.browser.clone());
    let (page, snapshot) = open_and_snapshot(&manager, url).await?;
    close_quietly(&manager, page).await;
    manager.close().await;

    let bundle = PageSignalExtractor::new(config.extraction.clone()).extract(&snapshot);
    write_output(&serde_json::to_string_pretty(&bundle)?, output)
}
