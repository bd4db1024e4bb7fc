//! navmap backend - GraphQL API for maps, places, routes and live telemetry
//!
//! All operations are exposed via GraphQL at /graphql.

use std::sync::Arc;

use anyhow::{Context, bail};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use navmap::api::{self, AppState};
use navmap::config::{Config, LogFormat};
use navmap::db::Database;
use navmap::graphql::{self, verify_schema};
use navmap::services::{PasswordHasher, PubSub, PubSubConfig};

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "navmap=debug,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer().pretty()).init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Arc::new(Config::from_env()?);

    init_tracing(config.log_format);
    tracing::info!("Starting navmap backend");

    let db = Database::connect(&config.database_url, config.database_max_connections)
        .await
        .context("Database connection failed")?;

    let sync = db.sync_schema().await;
    if !sync.errors.is_empty() {
        bail!("Schema sync failed: {}", sync.errors.join("; "));
    }

    let pubsub = Arc::new(PubSub::new(PubSubConfig {
        channel_capacity: config.broadcast_capacity,
    }));
    let password_hasher = PasswordHasher::new(config.bcrypt_cost);

    let schema = graphql::build_schema(db.clone(), pubsub, password_hasher);
    if let Err(e) = verify_schema(&schema) {
        bail!("GraphQL schema check failed: {}", e);
    }
    tracing::info!("GraphQL schema built");

    let state = AppState {
        config: config.clone(),
        db,
        schema,
    };
    let app = api::router(state);

    let addr = config.bind_addr()?;
    tracing::info!("Listening on {}", addr);
    tracing::info!("GraphQL playground: http://localhost:{}/graphql", config.port);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
