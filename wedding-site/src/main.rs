//! wedding-site - invitation page and RSVP service
//!
//! Serves the invitation page at `/` and `/{guest_id}` and records one RSVP
//! per guest through `/{guest_id}/rsvp`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wedding_common::config::{
    default_config_path, load_toml_config, resolve_bind_addr, DataFolderInitializer,
    DataFolderResolver, TomlConfig,
};
use wedding_site::{api, build_router, db, AppState};

/// Command-line arguments for wedding-site
#[derive(Parser, Debug)]
#[command(name = "wedding-site")]
#[command(about = "Wedding invitation page and RSVP service")]
#[command(version)]
struct Args {
    /// Folder holding the RSVP database (overrides WEDDING_DATA_FOLDER and config)
    #[arg(short, long)]
    data_folder: Option<PathBuf>,

    /// Address to listen on, e.g. 127.0.0.1:8080
    #[arg(short, long, env = "WEDDING_BIND_ADDR")]
    bind: Option<String>,

    /// Config file (default: ~/.config/wedding/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Read before tracing init: the config's log level seeds the filter
    let config_path = args.config.clone().or_else(default_config_path);
    let loaded = config_path
        .as_deref()
        .filter(|path| path.exists())
        .map(load_toml_config);
    let config = match &loaded {
        Some(Ok(config)) => config.clone(),
        _ => TomlConfig::default(),
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("{},tower_http=info", config.logging.level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let build = &api::BUILD_INFO;
    info!(
        "Starting wedding-site v{} [{}] built {} ({})",
        build.version, build.git_hash, build.build_timestamp, build.build_profile
    );

    match (&loaded, &config_path) {
        (Some(Ok(_)), Some(path)) => info!("Loaded config from {}", path.display()),
        (Some(Err(e)), _) => warn!("{}; using defaults", e),
        _ => info!("No config file found, using defaults"),
    }

    let resolver = DataFolderResolver::new(args.data_folder.clone(), config.clone());
    let initializer = DataFolderInitializer::new(resolver.resolve());
    initializer.ensure_directory_exists()?;

    let db_path = initializer.database_path();
    info!("Database path: {}", db_path.display());

    let pool = match db::init_database(&db_path).await {
        Ok(pool) => {
            info!("✓ Connected to database");
            pool
        }
        Err(e) => {
            error!("Failed to open database: {:#}", e);
            return Err(e);
        }
    };

    let app = build_router(AppState::new(pool));

    let bind_addr = resolve_bind_addr(args.bind, &config);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", bind_addr))?;
    info!("wedding-site listening on http://{}", bind_addr);
    info!("Health check: http://{}/health", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
