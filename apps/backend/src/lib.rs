pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod registry;
pub mod routes;

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use axum::{
    routing::{get, post, put},
    Router,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use trainer_core::{Catalog, TrainerSettings};

use crate::config::Config;
use crate::db::SqliteStore;
use crate::error::ApiError;
use crate::registry::SessionRegistry;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub settings: Arc<TrainerSettings>,
    pub store: Arc<Mutex<SqliteStore>>,
    pub sessions: Arc<Mutex<SessionRegistry>>,
    pub rng: Arc<Mutex<StdRng>>,
}

impl AppState {
    pub fn new(
        catalog: Catalog,
        settings: TrainerSettings,
        store: SqliteStore,
        rng_seed: Option<u64>,
    ) -> Self {
        let rng = match rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            catalog: Arc::new(catalog),
            settings: Arc::new(settings),
            store: Arc::new(Mutex::new(store)),
            sessions: Arc::new(Mutex::new(SessionRegistry::default())),
            rng: Arc::new(Mutex::new(rng)),
        }
    }

    /// Replace the idle timeout of sessions. Call before serving.
    pub fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.sessions = Arc::new(Mutex::new(SessionRegistry::new(ttl)));
        self
    }
}

/// Lock a shared resource, turning poisoning into an API error.
///
/// Handlers that need several locks take them in the order
/// sessions, store, rng.
pub(crate) fn lock<'a, T>(mutex: &'a Mutex<T>, what: &str) -> Result<MutexGuard<'a, T>, ApiError> {
    mutex
        .lock()
        .map_err(|_| ApiError::Internal(format!("{what} lock poisoned")))
}

/// Build the API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/modes", get(routes::modes::list))
        .route("/api/sessions", post(routes::sessions::create))
        .route(
            "/api/sessions/:id",
            get(routes::sessions::show).delete(routes::sessions::remove),
        )
        .route("/api/sessions/:id/check", post(routes::sessions::check))
        .route("/api/sessions/:id/next", post(routes::sessions::next))
        .route("/api/sessions/:id/mode", put(routes::sessions::switch_mode))
        .route(
            "/api/stats/:mode",
            get(routes::stats::show).delete(routes::stats::reset),
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

    tracing::info!(path = %config.catalog_path.display(), "Loading specimen catalog...");
    let catalog = Catalog::load(&config.catalog_path)?;

    tracing::info!(path = %config.database_path.display(), "Opening stats database...");
    let store = SqliteStore::open(&config.database_path)?;

    tracing::info!(
        modes = ?catalog.modes(),
        threshold = config.settings.match_threshold,
        session_ttl_secs = config.session_ttl.as_secs(),
        "Catalog ready"
    );

    let addr = config.bind_addr();
    let state = AppState::new(catalog, config.settings, store, config.rng_seed)
        .with_session_ttl(config.session_ttl);

    let app = router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
