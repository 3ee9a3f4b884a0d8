use async_trait::async_trait;

use crate::{AnalysisError, AnalysisReport, FilingBundle, Job};

/// Trait for LLM text-completion backends: prompt in, raw text out
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, AnalysisError>;
}

/// Trait for filings-search backends. Unavailability is a soft condition,
/// never an error: any transport failure resolves to None.
#[async_trait]
pub trait FilingSource: Send + Sync {
    async fn fetch_recent(&self, ticker: &str, cik: &str) -> Option<FilingBundle>;
}

/// Trait for job stores so a durable backend can replace the in-memory one
/// without touching the dispatcher or the API surface
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Insert a fresh job with status Processing and return it
    async fn create(&self, ticker: &str) -> Job;

    async fn get(&self, job_id: &str) -> Option<Job>;

    /// Transition Processing -> Completed with the final report.
    /// Rejects unknown ids and jobs already in a terminal state.
    async fn complete(&self, job_id: &str, report: AnalysisReport) -> Result<(), AnalysisError>;

    /// Transition Processing -> Failed with an error message.
    /// Rejects unknown ids and jobs already in a terminal state.
    async fn fail(&self, job_id: &str, error: String) -> Result<(), AnalysisError>;
}
