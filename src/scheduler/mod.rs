// Cooperative task scheduler. One loop, one task at a time: scheduled ticks
// and manual runs share an execution gate so the store has a single writer.
// The gate guard is moved into the detached run, so a cancelled caller never
// releases it early.

pub mod tasks;
pub mod trigger;

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local, TimeDelta};
use serde::Serialize;
use tokio::sync::{Mutex, watch};

use crate::error::AppError;
use crate::models::status::TaskStatus;
use crate::store::Store;

pub use tasks::{TaskContext, TaskKind};
pub use trigger::Trigger;

#[derive(Debug)]
struct Registration {
    kind: TaskKind,
    trigger: Trigger,
    next_run: DateTime<Local>,
}

/// One row of the schedule view.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleEntry {
    pub task: String,
    pub trigger: String,
    pub next_run: DateTime<Local>,
}

pub struct Scheduler {
    tasks: TaskContext,
    registry: Mutex<Vec<Registration>>,
    gate: Arc<Mutex<()>>,
    poll_interval: Duration,
    stop_tx: watch::Sender<bool>,
}

impl Scheduler {
    pub fn new(tasks: TaskContext, poll_interval: Duration) -> Self {
        let (stop_tx, _) = watch::channel(false);
        Self {
            tasks,
            registry: Mutex::new(Vec::new()),
            gate: Arc::new(Mutex::new(())),
            poll_interval,
            stop_tx,
        }
    }

    pub fn store(&self) -> &Store {
        self.tasks.store()
    }

    /// Add a task to the registry, or replace its trigger if already present.
    /// The first due time is computed from now.
    pub fn register(&mut self, kind: TaskKind, trigger: Trigger) {
        self.register_at(kind, trigger, Local::now());
    }

    pub fn register_at(&mut self, kind: TaskKind, trigger: Trigger, now: DateTime<Local>) {
        let next_run = trigger.next_after(&now);
        let registry = self.registry.get_mut();
        match registry.iter_mut().find(|r| r.kind == kind) {
            Some(existing) => {
                existing.trigger = trigger;
                existing.next_run = next_run;
            }
            None => registry.push(Registration {
                kind,
                trigger,
                next_run,
            }),
        }
        tracing::debug!("Registered {kind} ({trigger}), next run at {next_run}");
    }

    pub async fn schedule(&self) -> Vec<ScheduleEntry> {
        self.registry
            .lock()
            .await
            .iter()
            .map(|r| ScheduleEntry {
                task: r.kind.name().to_string(),
                trigger: r.trigger.to_string(),
                next_run: r.next_run,
            })
            .collect()
    }

    /// Run every registered task whose due time is at or before `now`, in
    /// registration order, and reschedule each from its completion time.
    pub async fn tick_at(&self, now: DateTime<Local>) -> Vec<(TaskKind, TaskStatus)> {
        let due: Vec<TaskKind> = self
            .registry
            .lock()
            .await
            .iter()
            .filter(|r| r.next_run <= now)
            .map(|r| r.kind)
            .collect();

        if due.is_empty() {
            return Vec::new();
        }

        let started = Instant::now();
        let mut results = Vec::with_capacity(due.len());

        for kind in due {
            let status = self.execute(kind).await;
            let finished = now + TimeDelta::from_std(started.elapsed()).unwrap_or(TimeDelta::zero());

            if let Some(reg) = self.registry.lock().await.iter_mut().find(|r| r.kind == kind) {
                reg.next_run = reg.trigger.next_after(&finished);
            }
            results.push((kind, status));
        }

        results
    }

    /// Run a task immediately, whether or not it is registered or due.
    /// Waits for any task already in progress.
    pub async fn run_once(&self, task_name: &str) -> Result<TaskStatus, AppError> {
        let kind: TaskKind = task_name.parse()?;
        tracing::info!("Manual run of {kind}");
        Ok(self.execute(kind).await)
    }

    /// Run every registered task once, in registration order.
    pub async fn run_all(&self) -> Vec<(TaskKind, TaskStatus)> {
        let kinds: Vec<TaskKind> = self.registry.lock().await.iter().map(|r| r.kind).collect();
        let mut results = Vec::with_capacity(kinds.len());
        for kind in kinds {
            results.push((kind, self.execute(kind).await));
        }
        results
    }

    /// Operator refresh: scrape, then analyze the refreshed collection.
    pub async fn refresh(&self) -> Vec<(TaskKind, TaskStatus)> {
        let mut results = Vec::with_capacity(2);
        for kind in [TaskKind::JobScraping, TaskKind::MarketAnalysis] {
            results.push((kind, self.execute(kind).await));
        }
        results
    }

    /// Wait for the gate, then hand it to the run.
    async fn execute(&self, kind: TaskKind) -> TaskStatus {
        let gate = Arc::clone(&self.gate).lock_owned().await;
        self.tasks.execute(kind, gate).await
    }

    /// Poll the registry until `stop` is called. Returns an error only when
    /// the scheduler cannot run at all.
    pub async fn run_forever(&self) -> Result<(), AppError> {
        let registered = self.registry.lock().await.len();
        if registered == 0 {
            return Err(AppError::Config("no tasks registered".to_string()));
        }
        if self.poll_interval.is_zero() {
            return Err(AppError::Config("poll interval must be non-zero".to_string()));
        }

        let mut stop_rx = self.stop_tx.subscribe();
        tracing::info!(
            "Scheduler started with {registered} tasks, polling every {}s",
            self.poll_interval.as_secs()
        );

        loop {
            if *stop_rx.borrow_and_update() {
                break;
            }

            self.tick_at(Local::now()).await;

            tokio::select! {
                _ = tokio::time::sleep(self.poll_interval) => {}
                _ = stop_rx.changed() => {}
            }
        }

        tracing::info!("Scheduler stopped");
        Ok(())
    }

    /// Ask the loop to exit at its next poll boundary. A task already running
    /// is not interrupted.
    pub fn stop(&self) {
        self.stop_tx.send_replace(true);
    }

    pub fn is_stopped(&self) -> bool {
        *self.stop_tx.borrow()
    }
}
