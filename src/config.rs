use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::analyzer::LiveSettings;
use crate::error::AppError;
use crate::scheduler::{TaskKind, Trigger};

#[derive(Parser, Debug, Clone)]
#[command(name = "jobpulse", about = "Scheduled job-market collection and reporting")]
pub struct Config {
    /// Directory holding the JSON documents
    #[arg(long, env = "DATA_DIR", default_value = "data")]
    pub data_dir: PathBuf,

    /// Scheduler poll interval in seconds
    #[arg(long, env = "POLL_INTERVAL", default_value = "60")]
    pub poll_interval: u64,

    /// Hours between job scraping runs
    #[arg(long, env = "SCRAPE_EVERY_HOURS", default_value = "1")]
    pub scrape_every_hours: u32,

    /// Hours between market analysis runs
    #[arg(long, env = "ANALYSIS_EVERY_HOURS", default_value = "6")]
    pub analysis_every_hours: u32,

    /// Local time of day (HH:MM) for the daily report
    #[arg(long, env = "REPORT_AT", default_value = "09:00")]
    pub report_at: String,

    /// Local time of day (HH:MM) for the trends update
    #[arg(long, env = "TRENDS_AT", default_value = "18:00")]
    pub trends_at: String,

    /// JSON job feed; the built-in sample batch is used when unset
    #[arg(long, env = "JOB_FEED_URL")]
    pub feed_url: Option<String>,

    /// API key for the live analyzer; the fallback analyzer is used when unset
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,

    /// Model used by the live analyzer
    #[arg(long, env = "OPENAI_MODEL", default_value = "gpt-3.5-turbo")]
    pub openai_model: String,

    /// Base URL of the chat-completions API
    #[arg(long, env = "OPENAI_BASE_URL", default_value = "https://api.openai.com/v1")]
    pub openai_base_url: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(clap::Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Run the scheduler loop (default when no subcommand given)
    Run,
    /// Run the scheduler loop and serve the JSON API
    Serve {
        /// Listen address
        #[arg(long, env = "LISTEN_ADDR", default_value = "0.0.0.0:8080")]
        listen_addr: String,
    },
    /// Run one task now, or `all` for every registered task
    Trigger {
        /// Task name: job_scraping, market_analysis, daily_report, trends_update or all
        task: String,
    },
    /// Scrape, then re-run the market analysis
    Refresh,
    /// Print the status document and the schedule
    Status,
}

impl Config {
    /// Resolve the command, defaulting to Run if none specified.
    pub fn resolved_command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Run)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval)
    }

    /// The default registry, validated up front so a bad value stops the
    /// process before the loop starts.
    pub fn schedule(&self) -> Result<Vec<(TaskKind, Trigger)>, AppError> {
        if self.poll_interval == 0 {
            return Err(AppError::Config("poll interval must be non-zero".to_string()));
        }
        Ok(vec![
            (TaskKind::JobScraping, Trigger::every_hours(self.scrape_every_hours)?),
            (TaskKind::MarketAnalysis, Trigger::every_hours(self.analysis_every_hours)?),
            (TaskKind::DailyReport, Trigger::daily_at(&self.report_at)?),
            (TaskKind::TrendsUpdate, Trigger::daily_at(&self.trends_at)?),
        ])
    }

    pub fn live_analyzer(&self) -> Option<LiveSettings> {
        self.openai_api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .map(|key| LiveSettings {
                api_key: key.to_string(),
                model: self.openai_model.clone(),
                base_url: self.openai_base_url.clone(),
            })
    }
}
