pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    routing::{get, post, put},
    Router,
};
use phrase_core::{Clock, Library, SystemClock};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::error::ApiError;
use crate::services::Store;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Mutex<Store>>,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(store: Store, clock: Arc<dyn Clock>) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            clock,
        }
    }

    /// Lock the store for the duration of one request.
    pub fn store(&self) -> Result<MutexGuard<'_, Store>, ApiError> {
        self.store
            .lock()
            .map_err(|_| ApiError::Internal("store lock poisoned".to_string()))
    }
}

pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        // Deck routes
        .route("/decks", get(routes::decks::list).post(routes::decks::create))
        .route(
            "/decks/:id",
            get(routes::decks::get)
                .put(routes::decks::rename)
                .delete(routes::decks::delete),
        )
        .route("/decks/:id/session", post(routes::decks::start_session))
        .route("/decks/:id/phrases", post(routes::decks::add_phrase))
        .route(
            "/decks/:id/phrases/:phrase_id",
            put(routes::decks::update_phrase).delete(routes::decks::remove_phrase),
        )
        // Study routes
        .route("/study/card", get(routes::study::draw))
        .route("/study/action", post(routes::study::action))
        .route("/study/abandon", post(routes::study::abandon))
        // Stats routes
        .route("/stats", get(routes::stats::global))
        .route("/stats/report", get(routes::stats::report))
        // Settings routes
        .route("/settings", get(routes::settings::get_all))
        .route("/settings/global", put(routes::settings::update_global))
        .route(
            "/settings/deck/:id",
            put(routes::settings::update_deck).delete(routes::settings::delete_deck),
        )
        .route("/settings/deck/:id/effective", get(routes::settings::effective))
        // Backup routes
        .route(
            "/backup",
            get(routes::backup::export).put(routes::backup::restore),
        );

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let store = Store::new(Library::new(clock.today()), config.settings.clone());
    let app = build_router(AppState::new(store, clock));

    let addr = config.addr();
    tracing::info!(
        reinsertion_distance = config.settings.reinsertion_distance,
        mastery_threshold = config.settings.mastery_threshold,
        "Starting server on {}",
        addr
    );

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
