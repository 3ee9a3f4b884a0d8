//! Company Directory API Routes
//!
//! Endpoints for listing covered companies and fetching a single profile.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;

use analysis_core::CompanyProfile;

use crate::{AppError, AppState};

#[derive(Serialize)]
pub struct CompanyListResponse {
    pub companies: Vec<CompanyProfile>,
    pub total: usize,
    pub focus: &'static str,
}

pub fn company_routes() -> Router<AppState> {
    Router::new()
        .route("/api/companies", get(list_companies))
        .route("/api/companies/:ticker", get(get_company))
}

async fn list_companies(State(state): State<AppState>) -> Json<CompanyListResponse> {
    let companies = state.directory.list_all().to_vec();

    Json(CompanyListResponse {
        total: companies.len(),
        companies,
        focus: "US-listed biotech and innovative pharma companies",
    })
}

async fn get_company(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
) -> Result<Json<CompanyProfile>, AppError> {
    state
        .directory
        .lookup(&ticker)
        .cloned()
        .map(Json)
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "Company {} is not in the supported list. This platform covers US-listed biotech companies.",
                ticker
            ))
        })
}
