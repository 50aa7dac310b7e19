// Deduplication and frequency aggregation over an in-memory job collection.
// All functions here are pure and order-stable.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, Utc};
use indexmap::IndexMap;

use crate::models::job::Job;
use crate::models::trends::TrendSnapshot;

/// Number of skills kept in a trend snapshot.
pub const TOP_SKILLS: usize = 10;

/// Number of companies featured in a daily report.
pub const FEATURED_COMPANIES: usize = 5;

/// Keep the first occurrence of every identity, in input order.
pub fn dedup(jobs: Vec<Job>) -> Vec<Job> {
    let keep: Vec<bool> = {
        let mut seen = HashSet::with_capacity(jobs.len());
        jobs.iter().map(|job| seen.insert(job.identity())).collect()
    };

    jobs.into_iter()
        .zip(keep)
        .filter_map(|(job, keep)| keep.then_some(job))
        .collect()
}

/// Existing records first, then the incoming batch, deduplicated.
pub fn merge(existing: Vec<Job>, incoming: Vec<Job>) -> Vec<Job> {
    let mut all = existing;
    all.extend(incoming);
    dedup(all)
}

/// Count occurrences of each key and rank descending. Ties keep the order
/// in which keys were first encountered.
fn rank<'a>(keys: impl Iterator<Item = &'a str>, limit: usize) -> Vec<(&'a str, u64)> {
    let mut counts: IndexMap<&str, u64> = IndexMap::new();
    for key in keys {
        *counts.entry(key).or_insert(0) += 1;
    }

    let mut ranked: Vec<(&str, u64)> = counts.into_iter().collect();
    // sort_by is stable, so equal counts stay in first-seen order
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(limit);
    ranked
}

pub fn top_skills(jobs: &[Job], limit: usize) -> IndexMap<String, u64> {
    rank(
        jobs.iter().flat_map(|j| j.skills.iter().map(String::as_str)),
        limit,
    )
    .into_iter()
    .map(|(skill, count)| (skill.to_string(), count))
    .collect()
}

pub fn top_companies(jobs: &[Job], limit: usize) -> Vec<String> {
    rank(
        jobs.iter()
            .map(|j| j.company.as_str())
            .filter(|c| !c.is_empty()),
        limit,
    )
    .into_iter()
    .map(|(company, _)| company.to_string())
    .collect()
}

pub fn companies_hiring(jobs: &[Job]) -> u64 {
    jobs.iter()
        .map(|j| j.company.as_str())
        .filter(|c| !c.is_empty())
        .collect::<HashSet<_>>()
        .len() as u64
}

pub fn remote_jobs(jobs: &[Job]) -> u64 {
    jobs.iter().filter(|j| j.is_remote()).count() as u64
}

pub fn posted_on(jobs: &[Job], date: NaiveDate) -> u64 {
    jobs.iter().filter(|j| j.posted_date == date).count() as u64
}

pub fn compute_trends(jobs: &[Job], now: DateTime<Utc>) -> TrendSnapshot {
    TrendSnapshot {
        total_jobs: jobs.len() as u64,
        top_skills: top_skills(jobs, TOP_SKILLS),
        companies_hiring: companies_hiring(jobs),
        remote_jobs: remote_jobs(jobs),
        updated_at: Some(now),
    }
}
