//! Analysis Job API Routes
//!
//! Submission spawns the dispatcher run as a background task and returns
//! immediately with status `processing`; the result endpoint polls the job
//! store. Unknown-ticker failures land in the job's error field, not in the
//! submission response.

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use analysis_core::{AnalysisReport, JobStatus};

use crate::{AppError, AppState};

#[derive(Deserialize)]
pub struct AnalyzeRequest {
    pub ticker: String,
    #[serde(default = "default_filing_type")]
    pub filing_type: String,
}

fn default_filing_type() -> String {
    "10-K".to_string()
}

#[derive(Serialize)]
pub struct AnalyzeResponse {
    pub job_id: String,
    pub status: JobStatus,
    pub ticker: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct AnalysisResultResponse {
    pub job_id: String,
    pub status: JobStatus,
    pub ticker: String,
    pub result: Option<AnalysisReport>,
    pub error: Option<String>,
}

pub fn analysis_routes() -> Router<AppState> {
    Router::new()
        .route("/api/analyze", post(submit_analysis))
        .route("/api/analyze/:job_id", get(get_analysis_result))
}

async fn submit_analysis(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Json<AnalyzeResponse> {
    let ticker = request.ticker.trim().to_uppercase();
    let job = state.jobs.create(&ticker).await;

    tracing::info!(
        "Created analysis job {} for {} (filing type {})",
        job.job_id,
        ticker,
        request.filing_type
    );

    let dispatcher = state.dispatcher.clone();
    let jobs = state.jobs.clone();
    let job_id = job.job_id.clone();
    let job_ticker = ticker.clone();
    tokio::spawn(async move {
        match dispatcher.run_analysis(&job_ticker).await {
            Ok(report) => {
                if let Err(e) = jobs.complete(&job_id, report).await {
                    tracing::error!("Failed to record completion of job {}: {}", job_id, e);
                }
            }
            Err(e) => {
                tracing::warn!("Analysis job {} failed: {}", job_id, e);
                if let Err(store_err) = jobs.fail(&job_id, e.to_string()).await {
                    tracing::error!("Failed to record failure of job {}: {}", job_id, store_err);
                }
            }
        }
    });

    Json(AnalyzeResponse {
        job_id: job.job_id,
        status: job.status,
        ticker,
        message: "Analysis started".to_string(),
    })
}

async fn get_analysis_result(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<Json<AnalysisResultResponse>, AppError> {
    let job = state
        .jobs
        .get(&job_id)
        .await
        .ok_or_else(|| AppError::NotFound("Job not found".to_string()))?;

    Ok(Json(AnalysisResultResponse {
        job_id: job.job_id,
        status: job.status,
        ticker: job.ticker,
        result: job.result,
        error: job.error,
    }))
}
