// Medstock - medicine inventory server

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use medstock_server::codes::CodeStore;
use medstock_server::config::Config;
use medstock_server::{create_router, db, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("medstock_server=info,tower_http=info")),
        )
        .init();

    let config = Config::parse();

    let pool = db::create_pool(&config.database)
        .await
        .with_context(|| format!("Failed to open database {}", config.database.display()))?;
    db::run_migrations(&pool)
        .await
        .context("Failed to run migrations")?;

    let codes = CodeStore::new(&config.qr_dir);
    codes
        .ensure_dir()
        .await
        .with_context(|| format!("Failed to create QR directory {}", config.qr_dir.display()))?;

    let app = create_router(AppState { pool, codes });

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind))?;
    tracing::info!(
        addr = %config.bind,
        database = %config.database.display(),
        qr_dir = %config.qr_dir.display(),
        "medstock listening"
    );

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
