pub mod api;

use std::sync::Arc;

use axum::Router;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::scheduler::Scheduler;

async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub fn app(scheduler: Arc<Scheduler>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .merge(api::router(scheduler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
