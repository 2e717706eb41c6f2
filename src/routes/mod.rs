// HTTP routes: thin JSON shim over the uptime aggregator

mod http;

use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::aggregator::UptimeAggregator;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) aggregator: Arc<UptimeAggregator>,
}

/// Builds the router. `static_dir`, when set, serves the dashboard for every other path.
pub fn app(aggregator: Arc<UptimeAggregator>, static_dir: Option<&str>) -> Router {
    let state = AppState { aggregator };
    let router = Router::new()
        .route("/health", get(http::health_handler)) // GET /health
        .route("/version", get(http::version_handler)) // GET /version
        .route("/api/services", get(http::services_handler)) // GET /api/services
        .route("/api/status", get(http::overview_handler)) // GET /api/status
        .route("/api/check/{service}", get(http::check_handler)) // GET /api/check/:service
        .route("/api/uptime/{service}", get(http::uptime_handler)) // GET /api/uptime/:service?days=
        .with_state(state);
    let router = match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    };
    router.layer(CorsLayer::new().allow_origin(Any))
}
