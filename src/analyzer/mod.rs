// Market analysis collaborators. Call sites hold an `Arc<dyn MarketAnalyzer>`
// chosen once at startup and never check credentials themselves.

pub mod fallback;
pub mod openai;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::error::AppError;
use crate::models::analysis::MarketAnalysis;
use crate::models::job::Job;

pub use fallback::FallbackAnalyzer;
pub use openai::OpenAiAnalyzer;

#[async_trait]
pub trait MarketAnalyzer: Send + Sync {
    fn name(&self) -> &str;

    async fn analyze(&self, jobs: &[Job]) -> Result<MarketAnalysis, AppError>;
}

/// Runs the primary analyzer and substitutes the placeholder result when it
/// fails, so callers always get a well-formed analysis.
pub struct WithFallback<A> {
    primary: A,
}

impl<A: MarketAnalyzer> WithFallback<A> {
    pub fn new(primary: A) -> Self {
        Self { primary }
    }
}

#[async_trait]
impl<A: MarketAnalyzer> MarketAnalyzer for WithFallback<A> {
    fn name(&self) -> &str {
        self.primary.name()
    }

    async fn analyze(&self, jobs: &[Job]) -> Result<MarketAnalysis, AppError> {
        match self.primary.analyze(jobs).await {
            Ok(analysis) => Ok(analysis),
            Err(e) => {
                tracing::warn!(
                    "Analyzer '{}' unavailable, using fallback: {e}",
                    self.primary.name()
                );
                Ok(FallbackAnalyzer::placeholder(jobs, Utc::now()))
            }
        }
    }
}

/// Settings for the live analyzer.
#[derive(Debug, Clone)]
pub struct LiveSettings {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

/// Live analyzer (wrapped with fallback) when credentials are configured,
/// otherwise the placeholder analyzer.
pub fn build_analyzer(live: Option<LiveSettings>) -> Result<Arc<dyn MarketAnalyzer>, AppError> {
    match live {
        Some(settings) => {
            tracing::info!("Using live analyzer with model {}", settings.model);
            Ok(Arc::new(WithFallback::new(OpenAiAnalyzer::new(settings)?)))
        }
        None => {
            tracing::info!("No analyzer credentials configured, using fallback analyzer");
            Ok(Arc::new(FallbackAnalyzer))
        }
    }
}
