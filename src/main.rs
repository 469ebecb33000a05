//! BETBOOK — Personal sports betting ledger and dashboard backend
//!
//! Entry point. Loads configuration, initialises structured logging,
//! opens the SQLite ledger (running the additive schema migration), and
//! serves the dashboard API with graceful shutdown.

use anyhow::{Context, Result};
use tracing::info;

use betbook::api;
use betbook::config;
use betbook::storage::Store;

const BANNER: &str = r#"
 ____  _____ _____ ____   ___   ___  _  __
| __ )| ____|_   _| __ ) / _ \ / _ \| |/ /
|  _ \|  _|   | | |  _ \| | | | | | | ' /
| |_) | |___  | | | |_) | |_| | |_| | . \
|____/|_____| |_| |____/ \___/ \___/|_|\_\

  Sports Betting Ledger & Dashboard
  v0.1.0
"#;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    let cfg = config::AppConfig::load("config.toml")?;

    init_logging();

    println!("{BANNER}");
    info!(
        database = %cfg.database.path,
        port = cfg.server.port,
        "BETBOOK starting up"
    );

    // Any failure here (disk, corruption, migration) is fatal to startup.
    let store = Store::open(&cfg.database.path).await?;

    let app = api::build_router(store);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], cfg.server.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind port {}", cfg.server.port))?;

    let port = cfg.server.port;
    info!(port, "Dashboard API listening on http://localhost:{port}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("API server error")?;

    info!("BETBOOK shut down cleanly.");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received.");
    }
}

/// Initialise the `tracing` subscriber.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("betbook=info"));

    let json_logging = std::env::var("BETBOOK_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_thread_ids(true)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    }
}
