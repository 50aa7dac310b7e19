use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single job posting as persisted in the job collection document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub location: String,
    /// Free-text range, e.g. "$120K - $180K".
    #[serde(default)]
    pub salary: String,
    #[serde(default)]
    pub skills: Vec<String>,
    pub posted_date: NaiveDate,
    #[serde(default)]
    pub source: String,
}

/// Deduplication key. Compared field by field, so values that would
/// concatenate to the same string never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JobIdentity<'a> {
    pub title: &'a str,
    pub company: &'a str,
    pub location: &'a str,
}

impl Job {
    pub fn identity(&self) -> JobIdentity<'_> {
        JobIdentity {
            title: &self.title,
            company: &self.company,
            location: &self.location,
        }
    }

    pub fn is_remote(&self) -> bool {
        self.location.to_lowercase().contains("remote")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(title: &str, company: &str, location: &str) -> Job {
        Job {
            title: title.into(),
            company: company.into(),
            location: location.into(),
            salary: String::new(),
            skills: vec![],
            posted_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            source: "test".into(),
        }
    }

    #[test]
    fn identity_does_not_collide_on_concatenation() {
        let a = job("A-B", "C", "X");
        let b = job("A", "B-C", "X");
        assert_ne!(a.identity(), b.identity());
    }

    #[test]
    fn identity_ignores_non_key_fields() {
        let a = job("Engineer", "Acme", "Remote");
        let mut b = a.clone();
        b.salary = "$1".into();
        b.skills = vec!["Rust".into()];
        assert_eq!(a.identity(), b.identity());
    }

    #[test]
    fn remote_match_is_case_insensitive_substring() {
        assert!(job("t", "c", "Remote Worldwide").is_remote());
        assert!(job("t", "c", "Berlin (REMOTE ok)").is_remote());
        assert!(!job("t", "c", "San Francisco, CA").is_remote());
    }

    #[test]
    fn missing_optional_fields_deserialize_to_defaults() {
        let raw = r#"{"title":"Dev","company":"Acme","posted_date":"2024-05-01"}"#;
        let job: Job = serde_json::from_str(raw).unwrap();
        assert_eq!(job.location, "");
        assert!(job.skills.is_empty());
    }
}
