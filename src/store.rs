use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::AppError;
use crate::models::analysis::MarketAnalysis;
use crate::models::job::Job;
use crate::models::report::DailyReport;
use crate::models::status::{SchedulerStatus, TaskStatus};
use crate::models::trends::TrendSnapshot;

pub const JOBS_FILE: &str = "jobs_database.json";
pub const STATUS_FILE: &str = "scheduler_status.json";
pub const TRENDS_FILE: &str = "market_trends.json";
pub const ANALYSIS_FILE: &str = "market_analysis.json";
pub const LATEST_REPORT_FILE: &str = "latest_report.json";
pub const REPORTS_DIR: &str = "daily_reports";

/// File-backed document store. Every document is read and written whole;
/// there are no field-level updates.
#[derive(Debug, Clone)]
pub struct Store {
    root: PathBuf,
}

impl Store {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn report_path(&self, date: NaiveDate) -> PathBuf {
        self.root
            .join(REPORTS_DIR)
            .join(format!("report_{}.json", date.format("%Y_%m_%d")))
    }

    /// Read a document, falling back to the type's empty value when the file
    /// is missing, unreadable or does not parse.
    pub async fn load_or_default<T>(&self, name: &str) -> T
    where
        T: DeserializeOwned + Default,
    {
        self.load_path_or_default(&self.root.join(name)).await
    }

    async fn load_path_or_default<T>(&self, path: &Path) -> T
    where
        T: DeserializeOwned + Default,
    {
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("{} not present, using empty default", path.display());
                return T::default();
            }
            Err(e) => {
                tracing::warn!("Failed to read {}: {e}; using empty default", path.display());
                return T::default();
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Failed to parse {}: {e}; using empty default", path.display());
                T::default()
            }
        }
    }

    /// Replace a document: write a sibling temp file, then rename over the
    /// target so readers never see a partial write.
    async fn write_path<T: Serialize>(&self, path: &Path, value: &T) -> Result<(), AppError> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let bytes = serde_json::to_vec_pretty(value)?;
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, path).await?;
        Ok(())
    }

    pub async fn write_document<T: Serialize>(&self, name: &str, value: &T) -> Result<(), AppError> {
        self.write_path(&self.root.join(name), value).await
    }

    pub async fn load_jobs(&self) -> Vec<Job> {
        self.load_or_default(JOBS_FILE).await
    }

    pub async fn save_jobs(&self, jobs: &[Job]) -> Result<(), AppError> {
        self.write_document(JOBS_FILE, &jobs).await
    }

    pub async fn load_status(&self) -> SchedulerStatus {
        self.load_or_default(STATUS_FILE).await
    }

    /// Replace one task's entry, leaving every other entry as stored.
    pub async fn record_status(&self, task: &str, status: TaskStatus) -> Result<(), AppError> {
        let mut doc = self.load_status().await;
        doc.record(task, status, Utc::now());
        self.write_document(STATUS_FILE, &doc).await
    }

    pub async fn load_trends(&self) -> TrendSnapshot {
        self.load_or_default(TRENDS_FILE).await
    }

    pub async fn save_trends(&self, trends: &TrendSnapshot) -> Result<(), AppError> {
        self.write_document(TRENDS_FILE, trends).await
    }

    pub async fn load_analysis(&self) -> Option<MarketAnalysis> {
        self.load_or_default(ANALYSIS_FILE).await
    }

    pub async fn save_analysis(&self, analysis: &MarketAnalysis) -> Result<(), AppError> {
        self.write_document(ANALYSIS_FILE, analysis).await
    }

    /// Write the dated report file and refresh the latest copy.
    pub async fn write_daily_report(&self, report: &DailyReport) -> Result<PathBuf, AppError> {
        let path = self.report_path(report.date);
        self.write_path(&path, report).await?;
        self.write_document(LATEST_REPORT_FILE, report).await?;
        Ok(path)
    }

    pub async fn load_report(&self, date: NaiveDate) -> Option<DailyReport> {
        self.load_path_or_default(&self.report_path(date)).await
    }

    pub async fn load_latest_report(&self) -> Option<DailyReport> {
        self.load_or_default(LATEST_REPORT_FILE).await
    }
}
