use clap::{ArgAction, Parser};
use std::net::SocketAddr;
use std::path::PathBuf;
use url::Url;

use crate::predictions::FailurePolicy;
use crate::render::Variant;

/// NBA playoff probability dashboard
#[derive(Parser, Debug, Clone)]
#[command(name = "playoff-oracle", version, about)]
pub struct Config {
    /// Predictions document: http(s) URL, file:// URL or filesystem path
    #[arg(long, env = "PREDICTIONS_URL", default_value = "./predictions.json")]
    pub predictions: String,

    /// Page layout: two conference card grids or six division tables
    #[arg(long, env = "VARIANT", value_enum, default_value = "conference")]
    pub variant: Variant,

    /// What to show when predictions cannot be loaded (defaults per variant:
    /// conference → fallback, division → placeholder)
    #[arg(long, env = "FAILURE_POLICY", value_enum)]
    pub failure_policy: Option<FailurePolicy>,

    /// Animate probability bars filling in after the page loads
    #[arg(long, env = "ANIMATE", default_value = "true", action = ArgAction::Set)]
    pub animate: bool,

    /// Dashboard listen address
    #[arg(long, env = "DASHBOARD_ADDR", default_value = "0.0.0.0:8080")]
    pub dashboard_addr: String,

    /// Render the page once to this file and exit instead of serving it
    #[arg(long, env = "OUTPUT")]
    pub output: Option<PathBuf>,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.predictions.trim().is_empty() {
            anyhow::bail!("predictions location must not be empty");
        }
        if self.output.is_none() && self.dashboard_addr.parse::<SocketAddr>().is_err() {
            anyhow::bail!(
                "dashboard_addr '{}' is not a valid socket address",
                self.dashboard_addr
            );
        }
        Ok(())
    }

    pub fn failure_policy(&self) -> FailurePolicy {
        self.failure_policy
            .unwrap_or_else(|| self.variant.default_policy())
    }

    /// Local file behind `predictions`, if it is not an HTTP URL.
    pub fn predictions_path(&self) -> Option<PathBuf> {
        match Url::parse(&self.predictions) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => None,
            Ok(url) if url.scheme() == "file" => url.to_file_path().ok(),
            _ => Some(PathBuf::from(&self.predictions)),
        }
    }
}
