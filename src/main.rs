use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use tracing::info;

mod config;
mod dashboard;
mod pipeline;
mod predictions;
mod render;

use config::Config;
use dashboard::AppState;
use predictions::{source_for, Loader};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing / logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();
    config.validate()?;

    let source = source_for(&config.predictions)?;
    let policy = config.failure_policy();
    info!(
        "Predictions from {} ({:?} page, on failure: {:?})",
        source.location(),
        config.variant,
        policy
    );
    let loader = Loader::new(source, policy);

    // One-shot static render
    if let Some(output) = &config.output {
        let cycle = pipeline::run(&loader, config.variant, config.animate).await;
        tokio::fs::write(output, cycle.html())
            .await
            .with_context(|| format!("Failed to write {}", output.display()))?;
        info!(
            "Wrote {} containers ({} data) to {}",
            cycle.page.containers.len(),
            cycle.outcome.source_label(),
            output.display()
        );
        return Ok(());
    }

    let state = AppState {
        loader,
        variant: config.variant,
        animate: config.animate,
        predictions_path: config.predictions_path(),
    };
    let app = dashboard::router(state);
    let addr: SocketAddr = config.dashboard_addr.parse()?;
    info!("Dashboard listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
