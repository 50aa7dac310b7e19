use async_trait::async_trait;
use chrono::Local;

use crate::collectors::JobCollector;
use crate::error::AppError;
use crate::models::job::Job;

/// Built-in placeholder source returning a fixed batch dated today.
/// Used when no feed URL is configured.
pub struct SampleCollector;

#[async_trait]
impl JobCollector for SampleCollector {
    fn name(&self) -> &str {
        "sample"
    }

    async fn fetch_batch(&self) -> Result<Vec<Job>, AppError> {
        let today = Local::now().date_naive();
        let job = |title: &str, company: &str, location: &str, salary: &str, skills: &[&str]| Job {
            title: title.to_string(),
            company: company.to_string(),
            location: location.to_string(),
            salary: salary.to_string(),
            skills: skills.iter().map(|s| s.to_string()).collect(),
            posted_date: today,
            source: self.name().to_string(),
        };

        Ok(vec![
            job(
                "Senior AI Engineer",
                "TechCorp",
                "Remote",
                "$120K - $180K",
                &["Python", "Machine Learning", "TensorFlow"],
            ),
            job(
                "Data Science Lead",
                "DataFlow Inc",
                "San Francisco, CA",
                "$140K - $200K",
                &["Python", "SQL", "Pandas", "Scikit-learn"],
            ),
            job(
                "Full Stack Developer",
                "RemoteFirst Co",
                "Remote Worldwide",
                "$80K - $120K",
                &["React", "Node.js", "MongoDB"],
            ),
        ])
    }
}
