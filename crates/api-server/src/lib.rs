//! Veritas HTTP API.
//!
//! Thin axum surface over the company directory, the fan-out analysis
//! dispatcher and the job store. Analysis submissions run as background
//! tasks; clients poll the job endpoint for the result.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    http::{HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::json;
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use analysis_core::{CompletionProvider, FilingSource, JobStore};
use analysis_dispatcher::AnalysisDispatcher;
use claude_client::ClaudeClient;
use company_directory::CompanyDirectory;
use job_store::InMemoryJobStore;
use sec_client::SecFilingsClient;

pub mod analysis_routes;
pub mod company_routes;

pub const SERVICE_NAME: &str = "Veritas API";
pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_PORT: u16 = 8000;

/// Frontend origins allowed by CORS
const ALLOWED_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://localhost:3001"];

#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<CompanyDirectory>,
    pub dispatcher: Arc<AnalysisDispatcher>,
    pub jobs: Arc<dyn JobStore>,
}

/// Route-level error. NotFound carries the human-readable message surfaced
/// in the 404 body; anything else is a 500 with the error text.
pub enum AppError {
    NotFound(String),
    Internal(anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            AppError::NotFound(detail) => (StatusCode::NOT_FOUND, detail),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {:#}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        AppError::Internal(err.into())
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: SERVICE_NAME,
        version: SERVICE_VERSION,
    })
}

fn cors_layer() -> CorsLayer {
    let origins: Vec<HeaderValue> = ALLOWED_ORIGINS
        .iter()
        .map(|o| HeaderValue::from_static(o))
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health))
        .merge(company_routes::company_routes())
        .merge(analysis_routes::analysis_routes())
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let directory = Arc::new(CompanyDirectory::new());
    // Missing LLM credential is fatal at startup; a missing filings
    // credential only degrades analysis context.
    let completion: Arc<dyn CompletionProvider> =
        Arc::new(ClaudeClient::from_env().map_err(|e| anyhow::anyhow!(e))?);
    let filings: Arc<dyn FilingSource> = Arc::new(SecFilingsClient::from_env());
    let dispatcher = Arc::new(AnalysisDispatcher::new(
        directory.clone(),
        completion,
        filings,
    ));
    let jobs: Arc<dyn JobStore> = Arc::new(InMemoryJobStore::new());

    let state = AppState {
        directory,
        dispatcher,
        jobs,
    };
    let app = router(state);

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_PORT);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("{} v{} listening on {}", SERVICE_NAME, SERVICE_VERSION, addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    use analysis_core::{AnalysisError, FilingBundle};

    struct MockCompletion {
        response: Result<String, String>,
    }

    #[async_trait]
    impl CompletionProvider for MockCompletion {
        async fn complete(&self, _prompt: &str) -> Result<String, AnalysisError> {
            self.response
                .clone()
                .map_err(AnalysisError::ApiError)
        }
    }

    struct NoFilings;

    #[async_trait]
    impl FilingSource for NoFilings {
        async fn fetch_recent(&self, _ticker: &str, _cik: &str) -> Option<FilingBundle> {
            None
        }
    }

    fn test_app(completion_response: Result<String, String>) -> Router {
        let directory = Arc::new(CompanyDirectory::new());
        let dispatcher = Arc::new(AnalysisDispatcher::new(
            directory.clone(),
            Arc::new(MockCompletion {
                response: completion_response,
            }),
            Arc::new(NoFilings),
        ));
        let jobs: Arc<dyn JobStore> = Arc::new(InMemoryJobStore::new());

        router(AppState {
            directory,
            dispatcher,
            jobs,
        })
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_endpoint_reports_service() {
        let app = test_app(Ok(r#"{"ok": true}"#.to_string()));

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "Veritas API");
    }

    #[tokio::test]
    async fn company_list_returns_whole_directory() {
        let app = test_app(Ok(r#"{"ok": true}"#.to_string()));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/companies")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["total"], 8);
        assert_eq!(body["companies"][0]["ticker"], "LEGN");
    }

    #[tokio::test]
    async fn company_lookup_is_case_insensitive_and_404s_on_miss() {
        let app = test_app(Ok(r#"{"ok": true}"#.to_string()));

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/companies/legn")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["company_name"], "Legend Biotech Corporation");

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/companies/AAPL")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert!(body["detail"].as_str().unwrap().contains("AAPL"));
    }

    #[tokio::test]
    async fn unknown_job_is_404() {
        let app = test_app(Ok(r#"{"ok": true}"#.to_string()));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/analyze/no-such-job")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["detail"], "Job not found");
    }

    async fn poll_until_terminal(app: &Router, job_id: &str) -> serde_json::Value {
        for _ in 0..100 {
            let response = app
                .clone()
                .oneshot(
                    Request::builder()
                        .uri(format!("/api/analyze/{}", job_id))
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            let body = body_json(response).await;
            if body["status"] != "processing" {
                return body;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        panic!("job {} never left processing", job_id);
    }

    #[tokio::test]
    async fn analyze_submission_runs_in_background_and_completes() {
        let app = test_app(Ok(r#"{"mocked": true}"#.to_string()));

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/analyze")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"ticker": "legn"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let submit = body_json(response).await;
        assert_eq!(submit["status"], "processing");
        assert_eq!(submit["ticker"], "LEGN");
        assert_eq!(submit["message"], "Analysis started");

        let job_id = submit["job_id"].as_str().unwrap().to_string();
        let result = poll_until_terminal(&app, &job_id).await;

        assert_eq!(result["status"], "completed");
        assert_eq!(result["result"]["company_name"], "Legend Biotech Corporation");
        assert_eq!(result["result"]["analysis"]["reality"]["mocked"], true);
        assert!(result["error"].is_null());
    }

    #[tokio::test]
    async fn analyze_unknown_ticker_fails_the_job_not_the_request() {
        let app = test_app(Ok(r#"{"mocked": true}"#.to_string()));

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/analyze")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"ticker": "AAPL", "filing_type": "10-Q"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let submit = body_json(response).await;
        let job_id = submit["job_id"].as_str().unwrap().to_string();

        let result = poll_until_terminal(&app, &job_id).await;
        assert_eq!(result["status"], "failed");
        assert!(result["error"].as_str().unwrap().contains("AAPL"));
        assert!(result["result"].is_null());
    }

    #[tokio::test]
    async fn analyze_completes_with_fallbacks_when_llm_is_down() {
        let app = test_app(Err("mocked outage".to_string()));

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/analyze")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"ticker": "LEGN"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        let submit = body_json(response).await;
        let job_id = submit["job_id"].as_str().unwrap().to_string();

        let result = poll_until_terminal(&app, &job_id).await;
        assert_eq!(result["status"], "completed");
        // Every dimension is populated from fallback data
        for dimension in ["reality", "survival", "competition", "history", "pipeline"] {
            assert!(
                result["result"]["analysis"][dimension].is_object(),
                "{} missing from degraded report",
                dimension
            );
        }
    }
}
