//! # venue-server
//!
//! HTTP server for the venue website: booking intake, content API and
//! uploaded media. Configuration comes from an optional YAML file layered
//! with `VENUE__`-prefixed environment variables, e.g.
//! `VENUE__DATABASE__URL` or `VENUE__MAIL__API_KEY`.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use figment::providers::{Env, Format, Yaml};
use figment::Figment;
use tracing::info;
use tracing_subscriber::EnvFilter;
use venue_service::config::LogFormat;
use venue_service::{module, Config, VenueServiceModule};

#[derive(Debug, Parser)]
#[command(name = "venue-server", version, about = "Event venue site backend")]
struct Cli {
    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `server.bind_addr`
    #[arg(long)]
    bind: Option<String>,

    /// Apply database migrations and exit
    #[arg(long)]
    migrate_only: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(bind) = cli.bind {
        config.server.bind_addr = bind;
    }

    init_tracing(&config);
    info!("Starting venue server v{}", env!("CARGO_PKG_VERSION"));
    info!(
        bind_addr = %config.server.bind_addr,
        mail_provider = ?config.mail.provider,
        notifications = ?config.notifications.mode,
        admin_enabled = config.admin_token.is_some(),
        "Loaded configuration"
    );

    let db = module::connect(&config.database).await?;
    module::migrate(&db).await?;
    if cli.migrate_only {
        return Ok(());
    }

    let venue = VenueServiceModule::init(config.clone(), db).await?;
    let router = venue.router();

    let listener = tokio::net::TcpListener::bind(&config.server.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.server.bind_addr))?;
    info!(addr = %config.server.bind_addr, "HTTP server listening");

    let served = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    venue.shutdown().await;
    served.context("HTTP server failed")?;
    info!("Venue server stopped");
    Ok(())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let mut figment = Figment::new();
    if let Some(path) = path {
        anyhow::ensure!(path.exists(), "config file {} not found", path.display());
        figment = figment.merge(Yaml::file(path));
    }
    figment
        .merge(Env::prefixed("VENUE__").split("__"))
        .extract()
        .context("invalid configuration")
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match config.logging.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
