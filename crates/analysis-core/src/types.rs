use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Static profile facts for a covered company
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub ticker: String,
    pub company_name: String,
    pub company_name_cn: String,
    pub cik: String,
    pub sic: String,
    pub sector: String,
    pub focus: String,
    pub key_products: Vec<String>,
    pub therapeutic_areas: Vec<String>,
}

/// One regulatory filing record as returned by the filings-search endpoint.
/// Field names mirror the upstream wire format.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filing {
    #[serde(default)]
    pub ticker: Option<String>,
    #[serde(default)]
    pub form_type: Option<String>,
    #[serde(default)]
    pub filed_at: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub cik: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub link_to_filing_details: Option<String>,
}

/// The most recent filings for one ticker, post-filtered to exact ticker matches
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilingBundle {
    pub latest_filing: Option<Filing>,
    pub filing_count: usize,
    pub filings: Vec<Filing>,
}

/// One structured value per analysis dimension. Built by the dispatcher;
/// fallback substitution guarantees no dimension is ever absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisDimensions {
    pub reality: Value,
    pub survival: Value,
    pub competition: Value,
    pub history: Value,
    pub pipeline: Value,
}

/// Composite analysis report for one ticker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub company_name: String,
    pub company_name_cn: String,
    pub ticker: String,
    pub focus: String,
    pub key_products: Vec<String>,
    pub therapeutic_areas: Vec<String>,
    pub sec_data: Option<FilingBundle>,
    pub analysis: AnalysisDimensions,
}

/// Job lifecycle state. Transitions only Processing -> Completed | Failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Processing,
    Completed,
    Failed,
}

/// One analysis request tracked from submission to result retrieval
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub job_id: String,
    pub ticker: String,
    pub status: JobStatus,
    pub created_at: DateTime<Utc>,
    pub result: Option<AnalysisReport>,
    pub error: Option<String>,
}
