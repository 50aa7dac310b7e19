use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use jobpulse::analyzer::build_analyzer;
use jobpulse::collectors::build_collector;
use jobpulse::config::{Command, Config};
use jobpulse::models::status::TaskStatus;
use jobpulse::routes;
use jobpulse::scheduler::{Scheduler, TaskContext, TaskKind};
use jobpulse::store::Store;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("jobpulse=info,tower_http=info")),
        )
        .init();

    let config = Config::parse();
    let schedule = config.schedule()?;

    let store = Store::new(config.data_dir.clone());
    let collector = build_collector(config.feed_url.as_deref())?;
    let analyzer = build_analyzer(config.live_analyzer())?;
    tracing::info!(
        "Using data dir {}, collector '{}', analyzer '{}'",
        store.root().display(),
        collector.name(),
        analyzer.name()
    );

    let mut scheduler = Scheduler::new(
        TaskContext::new(store, collector, analyzer),
        config.poll_interval(),
    );
    for (kind, trigger) in schedule {
        scheduler.register(kind, trigger);
    }
    let scheduler = Arc::new(scheduler);

    match config.resolved_command() {
        Command::Run => run_until_shutdown(scheduler).await?,
        Command::Serve { listen_addr } => {
            let app = routes::app(scheduler.clone());
            let listener = tokio::net::TcpListener::bind(&listen_addr).await?;
            tracing::info!("Listening on {listen_addr}");

            let server = tokio::spawn(async move { axum::serve(listener, app).await });
            let result = run_until_shutdown(scheduler).await;
            server.abort();
            result?;
        }
        Command::Trigger { task } => {
            let results = if task == "all" {
                scheduler.run_all().await
            } else {
                let kind: TaskKind = task.parse()?;
                vec![(kind, scheduler.run_once(kind.name()).await?)]
            };
            report_results(&results)?;
        }
        Command::Refresh => {
            let results = scheduler.refresh().await;
            report_results(&results)?;
        }
        Command::Status => {
            let view = serde_json::json!({
                "status": scheduler.store().load_status().await,
                "schedule": scheduler.schedule().await,
            });
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
    }

    Ok(())
}

/// Drive the scheduler loop until it fails or ctrl-c asks it to stop.
async fn run_until_shutdown(scheduler: Arc<Scheduler>) -> anyhow::Result<()> {
    let runner = scheduler.clone();
    let mut handle = tokio::spawn(async move { runner.run_forever().await });

    tokio::select! {
        result = &mut handle => {
            result??;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received, stopping after the current tick");
            scheduler.stop();
            handle.await??;
        }
    }

    Ok(())
}

fn report_results(results: &[(TaskKind, TaskStatus)]) -> anyhow::Result<()> {
    let mut failed = Vec::new();
    for (kind, status) in results {
        println!("{kind}: {}", serde_json::to_string(status)?);
        if status.error.is_some() {
            failed.push(kind.name());
        }
    }
    if !failed.is_empty() {
        anyhow::bail!("Tasks failed: {}", failed.join(", "));
    }
    Ok(())
}
