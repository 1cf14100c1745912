use anyhow::Context;
use clap::Parser;
use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

use devflow::config::{Cli, Config};
use devflow::db;
use devflow::routes;
use devflow::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Parse CLI args and load config
    let cli = Cli::parse();
    let data_dir = Config::data_dir(&cli);
    std::fs::create_dir_all(&data_dir)?;
    tracing::info!("Data directory: {}", data_dir.display());

    let config = Config::load(&cli).context("Could not resolve the database from DATABASE_URL")?;
    if let Some(target) = config.target() {
        tracing::info!("Database: {}", target);
    }

    // Initialize database
    let db_path = config
        .db_path()
        .context("No database file resolved")?
        .to_path_buf();
    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    if db::seed::seed_if_empty(&pool)? {
        tracing::info!("Seeded demo data into {}", db_path.display());
    }

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let app = routes::app(AppState { db: pool, config });

    // Start server
    tracing::info!("Listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
