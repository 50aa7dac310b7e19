use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::analysis::MarketAnalysis;
use crate::models::trends::TrendSnapshot;

/// Collections larger than this are reported as a hot market.
pub const HOT_MARKET_THRESHOLD: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketStatus {
    Hot,
    Growing,
}

impl MarketStatus {
    pub fn for_job_count(count: usize) -> Self {
        if count > HOT_MARKET_THRESHOLD {
            MarketStatus::Hot
        } else {
            MarketStatus::Growing
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_jobs_scanned: u64,
    /// Postings dated on the report day.
    pub new_opportunities: u64,
    pub market_status: MarketStatus,
}

/// One report per calendar day, plus a "latest" copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyReport {
    pub date: NaiveDate,
    pub title: String,
    pub summary: ReportSummary,
    pub trends: TrendSnapshot,
    pub ai_insights: MarketAnalysis,
    pub featured_companies: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

impl DailyReport {
    pub fn title_for(date: NaiveDate) -> String {
        format!("Daily Market Report - {}", date.format("%B %d, %Y"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn market_status_threshold_is_exclusive() {
        assert_eq!(MarketStatus::for_job_count(100), MarketStatus::Growing);
        assert_eq!(MarketStatus::for_job_count(101), MarketStatus::Hot);
    }

    #[test]
    fn title_uses_long_month_format() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(DailyReport::title_for(date), "Daily Market Report - March 07, 2024");
    }
}
