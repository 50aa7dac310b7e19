pub mod documents;
pub mod tasks;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};

use crate::scheduler::Scheduler;

pub fn router(scheduler: Arc<Scheduler>) -> Router {
    let api = Router::new()
        .route("/status", get(documents::status))
        .route("/schedule", get(documents::schedule))
        .route("/jobs", get(documents::jobs))
        .route("/trends", get(documents::trends))
        .route("/analysis", get(documents::analysis))
        .route("/reports/latest", get(documents::latest_report))
        .route("/tasks/{name}/run", post(tasks::run))
        .with_state(scheduler);

    Router::new().nest("/api/v1", api)
}
