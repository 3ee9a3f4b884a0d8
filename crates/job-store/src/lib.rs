//! Volatile in-memory job store.
//!
//! A cache of in-flight and finished analysis work for a single-process
//! deployment: no expiry, no persistence, job state dies with the process.
//! The `JobStore` trait seam lets a durable backend replace this without
//! touching the dispatcher or the API surface.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use uuid::Uuid;

use analysis_core::{AnalysisError, AnalysisReport, Job, JobStatus, JobStore};

#[derive(Default)]
pub struct InMemoryJobStore {
    jobs: DashMap<String, Job>,
}

impl InMemoryJobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

#[async_trait]
impl JobStore for InMemoryJobStore {
    async fn create(&self, ticker: &str) -> Job {
        let job = Job {
            job_id: Uuid::new_v4().to_string(),
            ticker: ticker.to_uppercase(),
            status: JobStatus::Processing,
            created_at: Utc::now(),
            result: None,
            error: None,
        };
        self.jobs.insert(job.job_id.clone(), job.clone());
        job
    }

    async fn get(&self, job_id: &str) -> Option<Job> {
        self.jobs.get(job_id).map(|entry| entry.clone())
    }

    async fn complete(&self, job_id: &str, report: AnalysisReport) -> Result<(), AnalysisError> {
        let mut entry = self
            .jobs
            .get_mut(job_id)
            .ok_or_else(|| AnalysisError::JobNotFound(job_id.to_string()))?;
        if entry.status != JobStatus::Processing {
            return Err(AnalysisError::JobFinalized(job_id.to_string()));
        }

        entry.status = JobStatus::Completed;
        entry.result = Some(report);
        Ok(())
    }

    async fn fail(&self, job_id: &str, error: String) -> Result<(), AnalysisError> {
        let mut entry = self
            .jobs
            .get_mut(job_id)
            .ok_or_else(|| AnalysisError::JobNotFound(job_id.to_string()))?;
        if entry.status != JobStatus::Processing {
            return Err(AnalysisError::JobFinalized(job_id.to_string()));
        }

        entry.status = JobStatus::Failed;
        entry.error = Some(error);
        Ok(())
    }
}
