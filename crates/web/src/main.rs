use std::sync::Arc;

use anyhow::Context;
use coach::DeepSeekClient;
use storage::Database;

mod app;
mod config;
mod error;
mod features;
mod middleware;

use app::{AppState, build_router};
use config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting LiftMind API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!(
        "Connecting to database at: {}",
        config
            .database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    );
    let db = Database::new(&config.database_url)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    let llm = match config.deepseek_api_key.clone() {
        Some(key) => Some(Arc::new(
            DeepSeekClient::new(key, config.deepseek_api_url.clone())
                .context("Failed to initialize the chat client")?,
        )),
        None => {
            tracing::warn!("DEEPSEEK_API_KEY is not set, coach chat is disabled");
            None
        }
    };

    let router = build_router(AppState { db, llm });

    let bind_address = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", bind_address);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;
    axum::serve(listener, router).await?;

    Ok(())
}
