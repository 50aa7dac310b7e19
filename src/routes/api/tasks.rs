use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};

use crate::error::AppError;
use crate::models::status::TaskStatus;
use crate::scheduler::Scheduler;

/// POST /api/v1/tasks/{name}/run
///
/// Runs the task immediately, waiting behind any task already in progress,
/// and returns the status record it wrote.
pub async fn run(
    State(scheduler): State<Arc<Scheduler>>,
    Path(name): Path<String>,
) -> Result<Json<TaskStatus>, AppError> {
    let status = scheduler.run_once(&name).await?;
    Ok(Json(status))
}
