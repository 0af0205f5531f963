pub mod routes;

use std::sync::Arc;

use axum::{response::Redirect, routing::get, Router};
use http::header::{HeaderValue, CACHE_CONTROL};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::AppConfig;
use routes::{health, overview};

pub type SharedConfig = Arc<AppConfig>;

/// Set by build.rs; shown in the page footer.
pub fn build_id() -> &'static str {
    option_env!("TRIAL_OVERVIEW_BUILD_ID").unwrap_or("dev")
}

pub fn app(config: AppConfig) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::to("/overview") }))
        .route("/overview", get(overview::overview_handler))
        .route("/health", get(health::health_handler))
        // The indicators move with the clock, never cache the page.
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(CatchPanicLayer::new())
        .with_state(Arc::new(config))
}
