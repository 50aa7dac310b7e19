use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Task-specific counters, e.g. `jobs_found` or `total_jobs`.
pub type Counters = BTreeMap<String, u64>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskOutcome {
    Success,
    Error,
}

/// Latest run of one task. Overwritten on every completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskStatus {
    pub last_run: DateTime<Utc>,
    pub status: TaskOutcome,
    pub run_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(flatten)]
    pub counters: Counters,
}

impl TaskStatus {
    pub fn success(run_id: Uuid, last_run: DateTime<Utc>, counters: Counters) -> Self {
        Self {
            last_run,
            status: TaskOutcome::Success,
            run_id,
            error: None,
            counters,
        }
    }

    pub fn failure(run_id: Uuid, last_run: DateTime<Utc>, error: impl Into<String>) -> Self {
        Self {
            last_run,
            status: TaskOutcome::Error,
            run_id,
            error: Some(error.into()),
            counters: Counters::new(),
        }
    }

    pub fn counter(&self, name: &str) -> Option<u64> {
        self.counters.get(name).copied()
    }
}

/// The scheduler status document: one entry per task name plus a
/// top-level `last_updated` stamp. A task absent from `tasks` has never run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchedulerStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub tasks: BTreeMap<String, TaskStatus>,
}

impl SchedulerStatus {
    pub fn task(&self, name: &str) -> Option<&TaskStatus> {
        self.tasks.get(name)
    }

    pub fn record(&mut self, name: &str, status: TaskStatus, now: DateTime<Utc>) {
        self.tasks.insert(name.to_string(), status);
        self.last_updated = Some(now);
    }
}
