//! stackscope: explain a web page's tech stack and design system.
//!
//! Main entry point for the stackscope CLI.

mod cli;
mod cmd_analyze;
mod cmd_screenshot;

use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use stackscope_config::{Config, ConfigLoader, ConfigValidator, LoggingConfig};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Commands};

/// Initialize tracing: console output on stderr plus an optional
/// daily-rolling log file.
///
/// Filter precedence: `--log-level`, then `RUST_LOG`, then `[logging] level`.
fn init_tracing(logging: &LoggingConfig, level_override: Option<&str>) -> Result<Option<WorkerGuard>> {
    let env_filter = match level_override {
        Some(level) => EnvFilter::try_new(level)?,
        None => EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&logging.level))?,
    };

    let (file_layer, guard) = match &logging.directory {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
            let file_appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix("stackscope")
                .filename_suffix("log")
                .max_log_files(30)
                .build(dir)?;
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            (
                Some(fmt::layer().with_writer(non_blocking).with_ansi(false)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    Ok(guard)
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(path) => ConfigLoader::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => ConfigLoader::load_or_default(&ConfigLoader::default_path())?,
    };
    Ok(config)
}

/// Cancel `token` on the first Ctrl-C.
fn cancel_on_ctrl_c(token: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling capture");
            token.cancel();
        }
    });
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(endpoint) = cli.endpoint {
        config.browser.endpoint = endpoint;
    }

    // Keep the file writer flushing until exit.
    let _guard = init_tracing(&config.logging, cli.log_level.as_deref())?;

    for warning in ConfigValidator::validate(&config)?.into_result()? {
        warn!("Config {}: {}", warning.path, warning.message);
    }

    let token = CancellationToken::new();
    cancel_on_ctrl_c(token.clone());

    info!("stackscope {}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Analyze { url, output, no_screenshot } => {
            if no_screenshot {
                config.capture.enabled = false;
            }
            cmd_analyze::run_analyze(&config, &url, output.as_deref(), token).await
        }
        Commands::Signals { url, output } => {
            cmd_analyze::run_signals(&config, &url, output.as_deref()).await
        }
        Commands::Screenshot { url, output } => {
            cmd_screenshot::run_screenshot(&config, &url, &output, token).await
        }
    }
}
