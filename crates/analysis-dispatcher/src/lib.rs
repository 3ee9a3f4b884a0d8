//! Fan-out analysis dispatcher.
//!
//! Given a ticker, gathers company and filing context, runs every analysis
//! protocol against the completion backend concurrently, and assembles the
//! per-dimension results into one composite report. Individual protocol
//! failures degrade to deterministic fallback data; once past the
//! precondition checks the dispatcher never surfaces a partial failure.

use std::sync::Arc;

use serde_json::Value;

use analysis_core::{
    AnalysisDimensions, AnalysisError, AnalysisReport, CompanyProfile, CompletionProvider, Filing,
    FilingSource,
};
use company_directory::CompanyDirectory;

pub mod extract;
pub mod fallback;
pub mod protocols;

pub use protocols::AnalysisProtocol;

pub struct AnalysisDispatcher {
    directory: Arc<CompanyDirectory>,
    completion: Arc<dyn CompletionProvider>,
    filings: Arc<dyn FilingSource>,
}

impl AnalysisDispatcher {
    pub fn new(
        directory: Arc<CompanyDirectory>,
        completion: Arc<dyn CompletionProvider>,
        filings: Arc<dyn FilingSource>,
    ) -> Self {
        Self {
            directory,
            completion,
            filings,
        }
    }

    /// Run the full multi-protocol analysis for one ticker.
    ///
    /// Fails only on an unknown ticker; filing lookup failures and individual
    /// protocol failures degrade to absent context and fallback data.
    pub async fn run_analysis(&self, ticker: &str) -> Result<AnalysisReport, AnalysisError> {
        let ticker = ticker.to_uppercase();
        let profile = self
            .directory
            .lookup(&ticker)
            .ok_or_else(|| AnalysisError::UnknownTicker(ticker.clone()))?
            .clone();

        tracing::info!("Starting analysis for {} ({})", ticker, profile.company_name);

        let sec_data = self.filings.fetch_recent(&ticker, &profile.cik).await;
        if sec_data.is_none() {
            tracing::debug!("No filing context for {}; proceeding without it", ticker);
        }

        let mut context = render_company_context(&profile);
        if let Some(filing) = sec_data.as_ref().and_then(|b| b.latest_filing.as_ref()) {
            context.push_str(&render_filing_context(filing, &profile));
        }

        // Fan out all protocol calls at once and wait for every one of them.
        // A slow or failing call never aborts its siblings; overall latency
        // is the slowest call, not the sum.
        let (reality, survival, competition, history, pipeline) = tokio::join!(
            self.run_protocol(AnalysisProtocol::Reality, &context, &ticker),
            self.run_protocol(AnalysisProtocol::Survival, &context, &ticker),
            self.run_protocol(AnalysisProtocol::Competition, &context, &ticker),
            self.run_protocol(AnalysisProtocol::History, &context, &ticker),
            self.run_protocol(AnalysisProtocol::Pipeline, &context, &ticker),
        );

        Ok(AnalysisReport {
            company_name: profile.company_name,
            company_name_cn: profile.company_name_cn,
            ticker,
            focus: profile.focus,
            key_products: profile.key_products,
            therapeutic_areas: profile.therapeutic_areas,
            sec_data,
            analysis: AnalysisDimensions {
                reality,
                survival,
                competition,
                history,
                pipeline,
            },
        })
    }

    /// Run one protocol to a structured value. Infallible: call errors and
    /// unparsable responses substitute the protocol's fallback dataset.
    async fn run_protocol(&self, protocol: AnalysisProtocol, context: &str, ticker: &str) -> Value {
        let prompt = format!(
            "{}\n\n{}\n{}",
            protocol.instructions(),
            context,
            protocol.directive()
        );

        match self.completion.complete(&prompt).await {
            Ok(text) => match extract::extract_json(&text) {
                Some(value) => value,
                None => {
                    tracing::warn!(
                        "Unparsable {} response for {}, substituting fallback: {}",
                        protocol.dimension(),
                        ticker,
                        text.chars().take(200).collect::<String>()
                    );
                    fallback::fallback_for(protocol, ticker)
                }
            },
            Err(e) => {
                tracing::warn!(
                    "{} analysis call failed for {}, substituting fallback: {}",
                    protocol.dimension(),
                    ticker,
                    e
                );
                fallback::fallback_for(protocol, ticker)
            }
        }
    }
}

fn render_company_context(profile: &CompanyProfile) -> String {
    format!(
        "Company Profile:\n\
         - Name: {} ({})\n\
         - Ticker: {}\n\
         - Sector: {}\n\
         - Focus Area: {}\n\
         - Key Products: {}\n\
         - Therapeutic Areas: {}\n",
        profile.company_name,
        profile.company_name_cn,
        profile.ticker,
        profile.sector,
        profile.focus,
        profile.key_products.join(", "),
        profile.therapeutic_areas.join(", "),
    )
}

fn render_filing_context(filing: &Filing, profile: &CompanyProfile) -> String {
    let filed_on = filing
        .filed_at
        .as_deref()
        .map(|d| d.chars().take(10).collect::<String>())
        .unwrap_or_else(|| "N/A".to_string());
    let description = filing
        .description
        .as_deref()
        .map(|d| d.chars().take(500).collect::<String>())
        .unwrap_or_else(|| "N/A".to_string());

    format!(
        "\nSEC Filing Data:\n\
         - Latest Filing: {} filed on {}\n\
         - Company: {}\n\
         - CIK: {}\n\
         - Description: {}\n",
        filing.form_type.as_deref().unwrap_or("N/A"),
        filed_on,
        filing.company_name.as_deref().unwrap_or(&profile.company_name),
        filing.cik.as_deref().unwrap_or(&profile.cik),
        description,
    )
}
