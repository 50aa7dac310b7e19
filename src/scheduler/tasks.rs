use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{Local, Utc};
use tokio::sync::OwnedMutexGuard;
use uuid::Uuid;

use crate::aggregate::{self, FEATURED_COMPANIES};
use crate::analyzer::MarketAnalyzer;
use crate::collectors::JobCollector;
use crate::error::AppError;
use crate::models::report::{DailyReport, MarketStatus, ReportSummary};
use crate::models::status::{Counters, TaskStatus};
use crate::store::Store;

/// The fixed catalogue of maintenance tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    JobScraping,
    MarketAnalysis,
    DailyReport,
    TrendsUpdate,
}

impl TaskKind {
    pub const ALL: [TaskKind; 4] = [
        TaskKind::JobScraping,
        TaskKind::MarketAnalysis,
        TaskKind::DailyReport,
        TaskKind::TrendsUpdate,
    ];

    /// Key used in the status document.
    pub fn name(self) -> &'static str {
        match self {
            TaskKind::JobScraping => "job_scraping",
            TaskKind::MarketAnalysis => "market_analysis",
            TaskKind::DailyReport => "daily_report",
            TaskKind::TrendsUpdate => "trends_update",
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TaskKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaskKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| AppError::UnknownTask(s.to_string()))
    }
}

/// Everything a task body needs: the store and the injected collaborators.
#[derive(Clone)]
pub struct TaskContext {
    store: Store,
    collector: Arc<dyn JobCollector>,
    analyzer: Arc<dyn MarketAnalyzer>,
}

fn counters<const N: usize>(pairs: [(&str, u64); N]) -> Counters {
    pairs
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}

impl TaskContext {
    pub fn new(
        store: Store,
        collector: Arc<dyn JobCollector>,
        analyzer: Arc<dyn MarketAnalyzer>,
    ) -> Self {
        Self {
            store,
            collector,
            analyzer,
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Run one task to completion and record its status. Failures, panics
    /// included, end up in the status record and never reach the caller.
    ///
    /// The run is detached and owns `gate`: if the caller is dropped, the
    /// body still finishes, its status is still recorded, and the gate stays
    /// held until both are done.
    pub async fn execute(&self, kind: TaskKind, gate: OwnedMutexGuard<()>) -> TaskStatus {
        let run_id = Uuid::new_v4();
        let ctx = self.clone();
        let run = tokio::spawn(async move {
            let status = ctx.run_and_record(kind, run_id).await;
            drop(gate);
            status
        });

        match run.await {
            Ok(status) => status,
            Err(e) => {
                let error = AppError::Aborted(e.to_string());
                tracing::error!("Task {kind} (run {run_id}) failed: {error}");
                TaskStatus::failure(run_id, Utc::now(), error.to_string())
            }
        }
    }

    async fn run_and_record(&self, kind: TaskKind, run_id: Uuid) -> TaskStatus {
        tracing::info!("Starting task {kind} (run {run_id})");

        let ctx = self.clone();
        let result = match tokio::spawn(async move { ctx.run_body(kind).await }).await {
            Ok(result) => result,
            Err(e) => Err(AppError::Aborted(e.to_string())),
        };

        let status = match result {
            Ok(counters) => {
                tracing::info!("Task {kind} (run {run_id}) succeeded: {counters:?}");
                TaskStatus::success(run_id, Utc::now(), counters)
            }
            Err(e) => {
                tracing::error!("Task {kind} (run {run_id}) failed: {e}");
                TaskStatus::failure(run_id, Utc::now(), e.to_string())
            }
        };

        if let Err(e) = self.store.record_status(kind.name(), status.clone()).await {
            tracing::error!("Failed to record status for {kind}: {e}");
        }

        status
    }

    async fn run_body(&self, kind: TaskKind) -> Result<Counters, AppError> {
        match kind {
            TaskKind::JobScraping => self.scrape_jobs().await,
            TaskKind::MarketAnalysis => self.analyze_market().await,
            TaskKind::DailyReport => self.generate_daily_report().await,
            TaskKind::TrendsUpdate => self.update_trends().await,
        }
    }

    async fn scrape_jobs(&self) -> Result<Counters, AppError> {
        let batch = self.collector.fetch_batch().await?;
        let found = batch.len() as u64;

        let existing = self.store.load_jobs().await;
        let merged = aggregate::merge(existing, batch);
        self.store.save_jobs(&merged).await?;

        Ok(counters([
            ("jobs_found", found),
            ("total_jobs", merged.len() as u64),
        ]))
    }

    async fn analyze_market(&self) -> Result<Counters, AppError> {
        let jobs = self.store.load_jobs().await;
        let analysis = self.analyzer.analyze(&jobs).await?;
        self.store.save_analysis(&analysis).await?;

        Ok(counters([("jobs_analyzed", jobs.len() as u64)]))
    }

    async fn generate_daily_report(&self) -> Result<Counters, AppError> {
        let jobs = self.store.load_jobs().await;
        let now = Utc::now();
        let date = Local::now().date_naive();

        let insights = self.analyzer.analyze(&jobs).await?;
        let new_opportunities = aggregate::posted_on(&jobs, date);

        let report = DailyReport {
            date,
            title: DailyReport::title_for(date),
            summary: ReportSummary {
                total_jobs_scanned: jobs.len() as u64,
                new_opportunities,
                market_status: MarketStatus::for_job_count(jobs.len()),
            },
            trends: aggregate::compute_trends(&jobs, now),
            ai_insights: insights,
            featured_companies: aggregate::top_companies(&jobs, FEATURED_COMPANIES),
            generated_at: now,
        };

        let path = self.store.write_daily_report(&report).await?;
        tracing::info!("Daily report written to {}", path.display());

        Ok(counters([
            ("jobs_scanned", jobs.len() as u64),
            ("new_opportunities", new_opportunities),
        ]))
    }

    async fn update_trends(&self) -> Result<Counters, AppError> {
        let jobs = self.store.load_jobs().await;
        let trends = aggregate::compute_trends(&jobs, Utc::now());
        self.store.save_trends(&trends).await?;

        Ok(counters([
            ("total_jobs", trends.total_jobs),
            ("companies_hiring", trends.companies_hiring),
            ("remote_jobs", trends.remote_jobs),
        ]))
    }
}
