use std::sync::Arc;

use anyhow::Context;
use breakfast_journal::{
    build_router,
    config::Config,
    db,
    storage::{KeyValueStore, SqliteStore},
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "breakfast_journal=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    let config = Config::from_env();

    // Database
    let pool = db::create_pool(&config.database_url)
        .await
        .context("open journal database")?;

    db::run_migrations(&pool)
        .await
        .context("apply database migrations")?;

    tracing::info!("Database migrations applied");

    let store = Arc::new(SqliteStore::new(pool)) as Arc<dyn KeyValueStore>;
    let addr = config.listen_addr();
    let state = AppState::new(store, config);

    let app = build_router(state);

    tracing::info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("bind {addr}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}
