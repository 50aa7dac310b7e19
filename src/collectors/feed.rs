use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use serde_json::Value;

use crate::collectors::JobCollector;
use crate::error::AppError;
use crate::models::job::Job;

const USER_AGENT: &str = concat!("jobpulse/", env!("CARGO_PKG_VERSION"));

/// Pulls job-shaped records from an HTTP endpoint serving JSON, either a
/// bare array or an object with a `jobs` array.
pub struct FeedCollector {
    client: reqwest::Client,
    url: String,
}

impl FeedCollector {
    pub fn new(url: &str) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| AppError::Collector(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            url: url.to_string(),
        })
    }
}

#[async_trait]
impl JobCollector for FeedCollector {
    fn name(&self) -> &str {
        "feed"
    }

    async fn fetch_batch(&self) -> Result<Vec<Job>, AppError> {
        let resp = self
            .client
            .get(&self.url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| AppError::Collector(format!("Feed request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::Collector(format!(
                "Feed returned {}",
                resp.status()
            )));
        }

        let data: Value = resp
            .json()
            .await
            .map_err(|e| AppError::Collector(format!("Failed to parse feed: {e}")))?;

        parse_feed(&data, Local::now().date_naive(), self.name())
    }
}

/// Parse a feed document into jobs. Entries without a title are skipped.
fn parse_feed(data: &Value, today: NaiveDate, default_source: &str) -> Result<Vec<Job>, AppError> {
    let entries = data
        .as_array()
        .or_else(|| data.get("jobs").and_then(|v| v.as_array()))
        .ok_or_else(|| AppError::Collector("Feed is not a list of jobs".to_string()))?;

    let mut jobs = Vec::with_capacity(entries.len());
    for raw in entries {
        match parse_job(raw, today, default_source) {
            Some(job) => jobs.push(job),
            None => tracing::debug!("Skipping feed entry without a title"),
        }
    }
    Ok(jobs)
}

fn parse_job(raw: &Value, today: NaiveDate, default_source: &str) -> Option<Job> {
    let text = |key: &str| raw.get(key).and_then(|v| v.as_str()).map(String::from);

    let title = text("title")?;

    let skills = raw
        .get("skills")
        .or_else(|| raw.get("tags"))
        .and_then(|v| v.as_array())
        .map(|a| {
            a.iter()
                .filter_map(|s| s.as_str())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default();

    // Accept either a plain date or a full timestamp; keep the date part.
    let posted_date = text("posted_date")
        .or_else(|| text("publication_date"))
        .and_then(|s| s.get(..10).and_then(|d| d.parse::<NaiveDate>().ok()))
        .unwrap_or(today);

    Some(Job {
        title,
        company: text("company")
            .or_else(|| text("company_name"))
            .unwrap_or_else(|| "Unknown".to_string()),
        location: text("location")
            .or_else(|| text("candidate_required_location"))
            .unwrap_or_default(),
        salary: text("salary").unwrap_or_default(),
        skills,
        posted_date,
        source: text("source").unwrap_or_else(|| default_source.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn parses_bare_array() {
        let data = json!([
            {
                "title": "Rust Engineer",
                "company": "Ferrous",
                "location": "Remote",
                "salary": "$150K",
                "skills": ["Rust", "Tokio"],
                "posted_date": "2024-05-30",
                "source": "board"
            }
        ]);
        let jobs = parse_feed(&data, today(), "feed").unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].skills, vec!["Rust", "Tokio"]);
        assert_eq!(jobs[0].posted_date, NaiveDate::from_ymd_opt(2024, 5, 30).unwrap());
        assert_eq!(jobs[0].source, "board");
    }

    #[test]
    fn parses_wrapped_list_with_alternate_keys() {
        let data = json!({
            "jobs": [
                {
                    "title": "Data Engineer",
                    "company_name": "Acme",
                    "candidate_required_location": "Worldwide",
                    "tags": ["SQL"],
                    "publication_date": "2024-05-29T10:00:00"
                },
                { "company": "No Title Inc" }
            ]
        });
        let jobs = parse_feed(&data, today(), "feed").unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].company, "Acme");
        assert_eq!(jobs[0].location, "Worldwide");
        assert_eq!(jobs[0].posted_date, NaiveDate::from_ymd_opt(2024, 5, 29).unwrap());
        assert_eq!(jobs[0].source, "feed");
    }

    #[test]
    fn missing_or_bad_date_defaults_to_today() {
        let data = json!([{ "title": "A", "posted_date": "yesterday" }, { "title": "B" }]);
        let jobs = parse_feed(&data, today(), "feed").unwrap();
        assert!(jobs.iter().all(|j| j.posted_date == today()));
        assert_eq!(jobs[0].company, "Unknown");
    }

    #[test]
    fn rejects_non_list_document() {
        assert!(matches!(
            parse_feed(&json!({ "results": [] }), today(), "feed"),
            Err(AppError::Collector(_))
        ));
    }
}
