mod args;
mod handlers;
mod routes;

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use args::Cli;
use ytrelay_core::{Config, YtDlp};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let filter = match cli.verbose {
        0 => "ytrelay=info,tower_http=warn",
        1 => "ytrelay=debug,tower_http=debug",
        2 => "ytrelay=trace,tower_http=trace",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    let mut config = Config::load(cli.config.as_deref())?;

    // CLI flags override the loaded config
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if cli.yt_dlp.is_some() {
        config.paths.yt_dlp = cli.yt_dlp;
    }
    if cli.static_dir.is_some() {
        config.assets.directory = cli.static_dir;
    }

    let extractor = Arc::new(YtDlp::new(config.yt_dlp_path()?));
    let app = routes::router(extractor, config.assets.directory.as_deref());

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding to {}", addr))?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("running server")?;

    Ok(())
}

async fn shutdown_signal() {
    // Only graceful shutdown is affected if this fails; the process still
    // terminates when Ctrl+C fires.
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to install Ctrl+C handler: {}", err);
    }
}
