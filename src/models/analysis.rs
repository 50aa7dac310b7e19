use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Structured result of a market analysis, live or fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketAnalysis {
    pub trend_analysis: String,
    pub hot_skills: Vec<String>,
    pub salary_insights: String,
    pub growth_prediction: String,
    pub recommendations: Vec<String>,
    pub generated_at: DateTime<Utc>,
    /// Which analyzer produced this result.
    pub source: String,
}

impl MarketAnalysis {
    /// All text fields present and at least one recommendation.
    pub fn is_well_formed(&self) -> bool {
        !self.trend_analysis.is_empty()
            && !self.salary_insights.is_empty()
            && !self.growth_prediction.is_empty()
            && !self.recommendations.is_empty()
    }
}
