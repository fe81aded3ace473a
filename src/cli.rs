//! CLI definitions for stackscope.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// stackscope CLI.
#[derive(Parser)]
#[command(name = "stackscope")]
#[command(about = "Explain a web page's tech stack and design system")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path (default: ~/.stackscope/config.toml)
    #[arg(short, long, global = true, env = "STACKSCOPE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `stackscope_capture=trace`
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// CDP endpoint of a Chrome started with --remote-debugging-port
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Run a full analysis and print the JSON report
    Analyze {
        /// Page URL
        url: String,

        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip the full-page screenshot
        #[arg(long)]
        no_screenshot: bool,
    },

    /// Extract page signals only (no LLM calls)
    Signals {
        /// Page URL
        url: String,

        /// Write the signals to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Capture a full-page screenshot
    Screenshot {
        /// Page URL
        url: String,

        /// Image file to write
        #[arg(short, long)]
        output: PathBuf,
    },
}
