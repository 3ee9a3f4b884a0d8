use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Unknown ticker: {0}")]
    UnknownTicker(String),

    #[error("Missing credential: {0}")]
    MissingCredential(String),

    #[error("Job not found: {0}")]
    JobNotFound(String),

    #[error("Job already finalized: {0}")]
    JobFinalized(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}
