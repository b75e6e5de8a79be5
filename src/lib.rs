use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod storage;

use config::Config;
use services::Journal;
use storage::KeyValueStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn KeyValueStore>,
    pub journal: Arc<Journal>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: Arc<dyn KeyValueStore>, config: Config) -> Self {
        let journal = Journal::with_options(store.clone(), config.journal_options());
        Self {
            store,
            journal: Arc::new(journal),
            config: Arc::new(config),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Entries
        .route(
            "/api/entries",
            get(handlers::entries::list_entries)
                .post(handlers::entries::create_entry)
                .delete(handlers::entries::clear_entries),
        )
        .route(
            "/api/entries/:id",
            get(handlers::entries::get_entry)
                .put(handlers::entries::update_entry)
                .delete(handlers::entries::delete_entry),
        )
        .route(
            "/api/days/:date_key/latest",
            get(handlers::entries::latest_for_day),
        )
        // Weeks
        .route("/api/weeks/entries", get(handlers::weeks::week_entries))
        .route("/api/weeks/days", get(handlers::weeks::week_days))
        .route("/api/weeks/stats", get(handlers::weeks::week_stats))
        .route("/api/weeks/summary", get(handlers::weeks::week_summary));

    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/readyz", get(handlers::health::readyz));

    let allowed_origins: Vec<HeaderValue> = std::iter::once(&state.config.frontend_url)
        .chain(state.config.cors_extra_origins.iter())
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(hv) => Some(hv),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
