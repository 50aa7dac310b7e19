use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Aggregate over the current job collection. Always recomputed in full.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendSnapshot {
    pub total_jobs: u64,
    /// Skill to posting count, in rank order.
    pub top_skills: IndexMap<String, u64>,
    pub companies_hiring: u64,
    pub remote_jobs: u64,
    pub updated_at: Option<DateTime<Utc>>,
}
