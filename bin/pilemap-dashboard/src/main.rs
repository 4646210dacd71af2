// SPDX-License-Identifier: AGPL-3.0-only
// Minimal bootstrap; loading, rendering and routing live in the library modules.
use anyhow::{Context, Result};
use clap::Parser;
use pilemap_dashboard::{config::DashboardConfig, http::build_router, AppState};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug, Clone)]
#[command(name = "pilemap-dashboard", about = "Map dashboard for piled-raft foundation case studies")]
struct Cli {
    /// Listen port, overriding the configured one.
    #[arg(long)]
    port: Option<u16>,
    /// Configuration file (toml, yaml or json).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "info,tower_http=info".into()),
        )
        .with_target(false)
        .init();
    let cli = Cli::parse();
    run(cli).await
}

async fn run(cli: Cli) -> Result<()> {
    let mut config =
        DashboardConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    let state = AppState::from_config(&config)?;
    let app = build_router(state);
    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    let local = listener.local_addr()?;
    info!(%local, "dashboard listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;
    info!("pilemap-dashboard shutting down");
    Ok(())
}
