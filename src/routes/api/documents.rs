use std::sync::Arc;

use axum::Json;
use axum::extract::State;

use crate::error::AppError;
use crate::models::analysis::MarketAnalysis;
use crate::models::job::Job;
use crate::models::report::DailyReport;
use crate::models::status::SchedulerStatus;
use crate::models::trends::TrendSnapshot;
use crate::scheduler::{ScheduleEntry, Scheduler};

pub async fn status(State(scheduler): State<Arc<Scheduler>>) -> Json<SchedulerStatus> {
    Json(scheduler.store().load_status().await)
}

pub async fn schedule(State(scheduler): State<Arc<Scheduler>>) -> Json<Vec<ScheduleEntry>> {
    Json(scheduler.schedule().await)
}

pub async fn jobs(State(scheduler): State<Arc<Scheduler>>) -> Json<Vec<Job>> {
    Json(scheduler.store().load_jobs().await)
}

pub async fn trends(State(scheduler): State<Arc<Scheduler>>) -> Json<TrendSnapshot> {
    Json(scheduler.store().load_trends().await)
}

pub async fn analysis(
    State(scheduler): State<Arc<Scheduler>>,
) -> Result<Json<MarketAnalysis>, AppError> {
    scheduler
        .store()
        .load_analysis()
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound("No market analysis yet".to_string()))
}

pub async fn latest_report(
    State(scheduler): State<Arc<Scheduler>>,
) -> Result<Json<DailyReport>, AppError> {
    scheduler
        .store()
        .load_latest_report()
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound("No daily report yet".to_string()))
}
