// Job sources. The scheduler only sees the trait; which implementation backs
// it is decided once at startup.

pub mod feed;
pub mod sample;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::job::Job;

pub use feed::FeedCollector;
pub use sample::SampleCollector;

/// Trait that all job sources must implement.
#[async_trait]
pub trait JobCollector: Send + Sync {
    /// Short name recorded as the origin tag of collected jobs.
    fn name(&self) -> &str;

    /// Fetch one batch of postings. Any failure is reported to the caller;
    /// collectors never panic on bad upstream data.
    async fn fetch_batch(&self) -> Result<Vec<Job>, AppError>;
}

/// Pick the collector for this process: an HTTP feed when a URL is
/// configured, otherwise the built-in sample batch.
pub fn build_collector(feed_url: Option<&str>) -> Result<Arc<dyn JobCollector>, AppError> {
    match feed_url {
        Some(url) => Ok(Arc::new(FeedCollector::new(url)?)),
        None => Ok(Arc::new(SampleCollector)),
    }
}
