#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use tempfile::TempDir;

use jobpulse::analyzer::{FallbackAnalyzer, MarketAnalyzer};
use jobpulse::collectors::JobCollector;
use jobpulse::error::AppError;
use jobpulse::models::analysis::MarketAnalysis;
use jobpulse::models::job::Job;
use jobpulse::scheduler::{Scheduler, TaskContext};
use jobpulse::store::Store;

pub fn job(title: &str, company: &str, location: &str, skills: &[&str]) -> Job {
    Job {
        title: title.to_string(),
        company: company.to_string(),
        location: location.to_string(),
        salary: "$100K - $140K".to_string(),
        skills: skills.iter().map(|s| s.to_string()).collect(),
        posted_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        source: "fixture".to_string(),
    }
}

/// Returns the same batch on every call.
pub struct FixedCollector(pub Vec<Job>);

#[async_trait]
impl JobCollector for FixedCollector {
    fn name(&self) -> &str {
        "fixed"
    }

    async fn fetch_batch(&self) -> Result<Vec<Job>, AppError> {
        Ok(self.0.clone())
    }
}

pub struct FailingCollector;

#[async_trait]
impl JobCollector for FailingCollector {
    fn name(&self) -> &str {
        "failing"
    }

    async fn fetch_batch(&self) -> Result<Vec<Job>, AppError> {
        Err(AppError::Collector("upstream unreachable".to_string()))
    }
}

pub struct PanickingCollector;

#[async_trait]
impl JobCollector for PanickingCollector {
    fn name(&self) -> &str {
        "panicking"
    }

    async fn fetch_batch(&self) -> Result<Vec<Job>, AppError> {
        panic!("collector bug")
    }
}

pub struct FailingAnalyzer;

#[async_trait]
impl MarketAnalyzer for FailingAnalyzer {
    fn name(&self) -> &str {
        "failing"
    }

    async fn analyze(&self, _jobs: &[Job]) -> Result<MarketAnalysis, AppError> {
        Err(AppError::Analyzer("no credentials".to_string()))
    }
}

pub struct Harness {
    pub dir: TempDir,
    pub store: Store,
    pub scheduler: Scheduler,
}

pub fn harness_with(
    collector: Arc<dyn JobCollector>,
    analyzer: Arc<dyn MarketAnalyzer>,
) -> Harness {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::new(dir.path());
    let scheduler = Scheduler::new(
        TaskContext::new(store.clone(), collector, analyzer),
        Duration::from_millis(10),
    );
    Harness {
        dir,
        store,
        scheduler,
    }
}

pub fn harness(batch: Vec<Job>) -> Harness {
    harness_with(Arc::new(FixedCollector(batch)), Arc::new(FallbackAnalyzer))
}

/// Sleeps before returning its batch, long enough for a caller to give up.
pub struct SlowCollector {
    pub delay: Duration,
    pub batch: Vec<Job>,
}

#[async_trait]
impl JobCollector for SlowCollector {
    fn name(&self) -> &str {
        "slow"
    }

    async fn fetch_batch(&self) -> Result<Vec<Job>, AppError> {
        tokio::time::sleep(self.delay).await;
        Ok(self.batch.clone())
    }
}
