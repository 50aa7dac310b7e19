use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Collector error: {0}")]
    Collector(String),

    #[error("Analyzer error: {0}")]
    Analyzer(String),

    #[error("Task aborted: {0}")]
    Aborted(String),

    #[error("Unknown task: {0}")]
    UnknownTask(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::UnknownTask(name) => {
                (StatusCode::NOT_FOUND, format!("Unknown task '{name}'"))
            }
            AppError::Config(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            other => {
                tracing::error!("Internal error: {other}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = axum::Json(json!({ "error": message }));
        (status, body).into_response()
    }
}
