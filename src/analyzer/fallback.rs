use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::aggregate::top_skills;
use crate::analyzer::MarketAnalyzer;
use crate::error::AppError;
use crate::models::analysis::MarketAnalysis;
use crate::models::job::Job;

const HOT_SKILLS: usize = 5;

const DEFAULT_HOT_SKILLS: [&str; HOT_SKILLS] =
    ["Python", "Machine Learning", "React", "AWS", "Data Science"];

/// Deterministic placeholder used when no live analyzer is available.
pub struct FallbackAnalyzer;

impl FallbackAnalyzer {
    pub fn placeholder(jobs: &[Job], now: DateTime<Utc>) -> MarketAnalysis {
        let mut hot_skills: Vec<String> = top_skills(jobs, HOT_SKILLS).into_keys().collect();
        if hot_skills.is_empty() {
            hot_skills = DEFAULT_HOT_SKILLS.iter().map(|s| s.to_string()).collect();
        }

        MarketAnalysis {
            trend_analysis: "Hiring demand is concentrated in AI/ML and cloud roles, with remote-first companies leading."
                .to_string(),
            hot_skills,
            salary_insights: "Specialist AI/ML roles command a premium over general development positions."
                .to_string(),
            growth_prediction: "Tech hiring is expected to keep growing over the next six months, driven by AI adoption."
                .to_string(),
            recommendations: vec![
                "Focus on AI/ML skills to reach the highest-paying opportunities".to_string(),
                "Build cloud expertise (AWS/Azure) for better remote prospects".to_string(),
                "Develop full-stack capabilities to widen the range of roles you fit".to_string(),
            ],
            generated_at: now,
            source: "fallback".to_string(),
        }
    }
}

#[async_trait]
impl MarketAnalyzer for FallbackAnalyzer {
    fn name(&self) -> &str {
        "fallback"
    }

    async fn analyze(&self, jobs: &[Job]) -> Result<MarketAnalysis, AppError> {
        Ok(Self::placeholder(jobs, Utc::now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn job(skills: &[&str]) -> Job {
        Job {
            title: "Dev".into(),
            company: "Acme".into(),
            location: "Remote".into(),
            salary: String::new(),
            skills: skills.iter().map(|s| s.to_string()).collect(),
            posted_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            source: "test".into(),
        }
    }

    #[test]
    fn placeholder_is_deterministic() {
        let now = Utc::now();
        let jobs = vec![job(&["Rust", "SQL"]), job(&["SQL"])];
        assert_eq!(
            FallbackAnalyzer::placeholder(&jobs, now),
            FallbackAnalyzer::placeholder(&jobs, now)
        );
    }

    #[test]
    fn hot_skills_follow_the_collection() {
        let jobs = vec![job(&["Rust", "SQL"]), job(&["SQL"])];
        let analysis = FallbackAnalyzer::placeholder(&jobs, Utc::now());
        assert_eq!(analysis.hot_skills, vec!["SQL", "Rust"]);
    }

    #[tokio::test]
    async fn empty_collection_still_well_formed() {
        let analysis = FallbackAnalyzer.analyze(&[]).await.unwrap();
        assert!(analysis.is_well_formed());
        assert_eq!(analysis.hot_skills.len(), HOT_SKILLS);
        assert_eq!(analysis.recommendations.len(), 3);
    }
}
