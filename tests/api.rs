mod common;

use std::sync::Arc;

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use common::{harness, job};
use jobpulse::routes;
use jobpulse::scheduler::{TaskKind, Trigger};

async fn call(app: axum::Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let resp = app
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn healthz_is_ok() {
    let h = harness(vec![]);
    let app = routes::app(Arc::new(h.scheduler));
    let (status, _) = call(app, "GET", "/healthz").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn manual_run_updates_status_document() {
    let h = harness(vec![job("A", "X", "Remote", &["Rust"]), job("B", "Y", "L", &[])]);
    let app = routes::app(Arc::new(h.scheduler));

    let (status, body) = call(app.clone(), "POST", "/api/v1/tasks/job_scraping/run").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["jobs_found"], 2);

    let (_, doc) = call(app.clone(), "GET", "/api/v1/status").await;
    assert_eq!(doc["job_scraping"]["total_jobs"], 2);

    let (_, jobs) = call(app, "GET", "/api/v1/jobs").await;
    assert_eq!(jobs.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn unknown_task_is_not_found() {
    let h = harness(vec![]);
    let app = routes::app(Arc::new(h.scheduler));
    let (status, body) = call(app, "POST", "/api/v1/tasks/reindex/run").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("reindex"));
}

#[tokio::test]
async fn absent_documents() {
    let h = harness(vec![]);
    let app = routes::app(Arc::new(h.scheduler));

    let (status, _) = call(app.clone(), "GET", "/api/v1/reports/latest").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call(app.clone(), "GET", "/api/v1/analysis").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, trends) = call(app, "GET", "/api/v1/trends").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(trends["total_jobs"], 0);
}

#[tokio::test]
async fn schedule_lists_registrations() {
    let mut h = harness(vec![]);
    h.scheduler
        .register(TaskKind::DailyReport, Trigger::daily_at("09:00").unwrap());
    let app = routes::app(Arc::new(h.scheduler));

    let (status, body) = call(app, "GET", "/api/v1/schedule").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["task"], "daily_report");
    assert_eq!(body[0]["trigger"], "daily at 09:00");
}
