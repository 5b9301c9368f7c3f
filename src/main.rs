use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use store_api::auth::AuthGate;
use store_api::config::AppConfig;
use store_api::database::manager;
use store_api::database::store_repository::PgStoreRepository;
use store_api::routes::{app, AppState};
use store_api::services::StoreService;

#[derive(Parser)]
#[command(name = "store-api", version, about = "JSON REST API for retail store records")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (the default)
    Serve,
    /// Apply database migrations, including seed data
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so `cargo run` picks up DATABASE_URL etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = AppConfig::from_env().context("invalid configuration")?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Migrate => migrate(&config).await,
        Command::Serve => serve(config).await,
    }
}

async fn migrate(config: &AppConfig) -> anyhow::Result<()> {
    let pool = manager::connect(&config.database).await?;
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("failed to apply migrations")?;
    tracing::info!("migrations applied");
    Ok(())
}

async fn serve(config: AppConfig) -> anyhow::Result<()> {
    let pool = manager::connect(&config.database).await?;

    let repository = Arc::new(PgStoreRepository::new(pool.clone()));
    let service = StoreService::new(repository);
    let auth = AuthGate::new(config.auth.api_token);
    let state = AppState { service, auth, pool };

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("store API listening on http://{}", bind_addr);
    axum::serve(listener, app(state)).await.context("server error")?;
    Ok(())
}
