//! Server bootstrap
//!
//! Reads environment configuration, opens the database connection, and only
//! binds the HTTP listener once the connection has been verified — a failed
//! connection terminates the process before any traffic is served.

use anyhow::Context;
use mongodb::Client;
use mongodb::bson::doc;
use tours_api::config::AppConfig;
use tours_api::server::{AppState, build_router};
use tours_api::tours::TourRepository;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tours_api=info,tower_http=info".into()),
        )
        .init();

    let config = AppConfig::from_env().context("failed to load configuration")?;

    let client = Client::with_uri_str(&config.database_url)
        .await
        .context("invalid MongoDB connection string")?;
    let database = client
        .default_database()
        .unwrap_or_else(|| client.database("tours"));

    // The driver connects lazily; ping before accepting any traffic.
    database
        .run_command(doc! { "ping": 1 })
        .await
        .context("failed to reach MongoDB")?;
    tracing::info!("DB connection successful");

    let tours = TourRepository::new(database);
    tours
        .ensure_indexes()
        .await
        .context("failed to create indexes")?;

    let app = build_router(AppState { tours });
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port))
        .await
        .with_context(|| format!("failed to bind port {}", config.port))?;
    tracing::info!("App running on port {}", config.port);

    axum::serve(listener, app).await?;

    Ok(())
}
