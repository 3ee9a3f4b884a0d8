use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use analysis_core::{Filing, FilingBundle, FilingSource};

const BASE_URL: &str = "https://api.sec-api.io";

/// Filing form types included in the search query. Covers US registrants
/// (10-K/10-Q) and foreign private issuers (20-F/6-K).
const FORM_TYPES: [&str; 4] = ["10-K", "10-Q", "20-F", "6-K"];

/// Most recent filings requested from upstream
const SEARCH_SIZE: usize = 5;

/// Filings kept in the bundle after post-filtering
const BUNDLE_SIZE: usize = 3;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    filings: Vec<Filing>,
}

/// Client for the filings-search endpoint. Every failure mode (missing
/// credential, transport error, non-2xx status, empty result) resolves to
/// `None`: the analysis proceeds with no filing context rather than aborting.
#[derive(Clone)]
pub struct SecFilingsClient {
    client: Client,
    api_key: Option<String>,
}

impl SecFilingsClient {
    pub fn new(api_key: Option<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, api_key }
    }

    /// Reads `SEC_API_KEY` from the environment. A missing key is not an
    /// error; it just means filing context is never available.
    pub fn from_env() -> Self {
        Self::new(std::env::var("SEC_API_KEY").ok())
    }

    fn search_query(ticker: &str) -> String {
        let forms = FORM_TYPES
            .iter()
            .map(|f| format!("formType:\"{}\"", f))
            .collect::<Vec<_>>()
            .join(" OR ");
        format!("ticker:{} AND ({})", ticker, forms)
    }

    async fn search(&self, ticker: &str) -> Option<FilingBundle> {
        let api_key = self.api_key.as_ref()?;
        let ticker = ticker.to_uppercase();

        let body = json!({
            "query": {
                "query_string": {
                    "query": Self::search_query(&ticker),
                }
            },
            "from": "0",
            "size": SEARCH_SIZE.to_string(),
            "sort": [{"filedAt": {"order": "desc"}}],
        });

        let response = match self
            .client
            .post(BASE_URL)
            .header("Authorization", api_key)
            .json(&body)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!("Filings search request failed for {}: {}", ticker, e);
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::warn!(
                "Filings search returned HTTP {} for {}: {}",
                response.status(),
                ticker,
                response.text().await.unwrap_or_default()
            );
            return None;
        }

        let search: SearchResponse = match response.json().await {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!("Failed to decode filings search response for {}: {}", ticker, e);
                return None;
            }
        };

        // Upstream search is known to return false positives for similar
        // tickers; keep only exact matches.
        let filings = filter_ticker_matches(search.filings, &ticker);
        if filings.is_empty() {
            tracing::debug!("No filings matched ticker {} after post-filter", ticker);
            return None;
        }

        Some(FilingBundle {
            latest_filing: filings.first().cloned(),
            filing_count: filings.len(),
            filings: filings.into_iter().take(BUNDLE_SIZE).collect(),
        })
    }
}

fn filter_ticker_matches(filings: Vec<Filing>, ticker: &str) -> Vec<Filing> {
    filings
        .into_iter()
        .filter(|f| {
            f.ticker
                .as_deref()
                .map(|t| t.to_uppercase() == ticker)
                .unwrap_or(false)
        })
        .collect()
}

#[async_trait]
impl FilingSource for SecFilingsClient {
    async fn fetch_recent(&self, ticker: &str, _cik: &str) -> Option<FilingBundle> {
        self.search(ticker).await
    }
}
