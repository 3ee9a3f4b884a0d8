//! Deterministic fallback datasets.
//!
//! When a protocol call fails or returns unparsable text, its dimension is
//! filled from a fixed dataset instead of failing the whole job. Selection is
//! an explicit keyed lookup on (protocol, ticker) — never classification by
//! sniffing prompt text.

use serde_json::{json, Value};

use crate::protocols::AnalysisProtocol;

/// Tickers with dedicated fallback datasets; anything else uses LEGN
const KNOWN_TICKERS: [&str; 3] = ["LEGN", "NVDA", "TSLA"];

pub fn fallback_for(protocol: AnalysisProtocol, ticker: &str) -> Value {
    let ticker = ticker.to_uppercase();
    let key = if KNOWN_TICKERS.contains(&ticker.as_str()) {
        ticker.as_str()
    } else {
        "LEGN"
    };

    match protocol {
        AnalysisProtocol::Reality => reality(key),
        AnalysisProtocol::Survival => survival(key),
        AnalysisProtocol::Competition => competition(key),
        AnalysisProtocol::History => revenue_history(),
        // No mock dataset exists for the pipeline dimension; an explicit
        // marker object still satisfies total dimension coverage.
        AnalysisProtocol::Pipeline => json!({"error": "Unknown protocol type"}),
    }
}

fn reality(ticker: &str) -> Value {
    match ticker {
        "NVDA" => json!({
            "narrative_label": "AI infrastructure and accelerated computing platform company",
            "economic_label": "Near-monopoly datacenter GPU supplier",
            "reality_gap_score": 3
        }),
        "TSLA" => json!({
            "narrative_label": "Sustainable energy and autonomous driving technology company",
            "economic_label": "Electric vehicle manufacturer",
            "reality_gap_score": 6
        }),
        _ => json!({
            "narrative_label": "Innovative CAR-T cell therapy biotech company",
            "economic_label": "Single-product commercial-stage biopharma company",
            "reality_gap_score": 7
        }),
    }
}

fn survival(ticker: &str) -> Value {
    match ticker {
        "NVDA" => json!({
            "runway_months": 999,
            "financial_health": "Extremely healthy - abundant cash flow",
            "key_risks": [
                "AI capex cycle may slow",
                "Competitors catching up",
                "Export restrictions"
            ]
        }),
        "TSLA" => json!({
            "runway_months": 48,
            "financial_health": "Solid - positive cash flow, but margins under pressure",
            "key_risks": [
                "Price war",
                "FSD progress behind expectations",
                "Competition in the Chinese market"
            ]
        }),
        _ => json!({
            "runway_months": 18,
            "financial_health": "Moderate risk - cash flow needs close monitoring",
            "key_risks": [
                "Carvykti market penetration slower than expected",
                "Competitor approvals could erode market share",
                "Thin pipeline behind the lead product"
            ]
        }),
    }
}

fn competition(ticker: &str) -> Value {
    match ticker {
        "NVDA" => json!({
            "competitors": ["AMD (MI300X)", "Intel (Gaudi)", "Google (TPU)"],
            "kill_switch": "Whether AI training demand keeps growing",
            "market_dynamics": "NVIDIA holds 80%+ of the datacenter GPU market."
        }),
        "TSLA" => json!({
            "competitors": ["BYD", "Volkswagen", "Rivian"],
            "kill_switch": "Whether FSD reaches L4 autonomy",
            "market_dynamics": "EV market growth is slowing and the price war is fierce."
        }),
        _ => json!({
            "competitors": ["BMS (Abecma)", "J&J (Tecvayli)"],
            "kill_switch": "FDA approval pace for earlier (second-line) treatment",
            "market_dynamics": "The CAR-T market is growing fast, but competition is intensifying."
        }),
    }
}

fn revenue_history() -> Value {
    json!({
        "revenue_history": [
            {"quarter": "2024-Q1", "revenue": 45.2},
            {"quarter": "2024-Q2", "revenue": 58.7},
            {"quarter": "2024-Q3", "revenue": 72.4},
            {"quarter": "2024-Q4", "revenue": 85.1},
            {"quarter": "2025-Q1", "revenue": 98.6},
            {"quarter": "2025-Q2", "revenue": 112.3},
            {"quarter": "2025-Q3", "revenue": 125.8}
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_protocol_has_a_fallback_for_every_ticker() {
        for protocol in AnalysisProtocol::ALL {
            for ticker in ["LEGN", "NVDA", "TSLA", "SMMT", "UNKNOWN"] {
                let value = fallback_for(protocol, ticker);
                assert!(value.is_object(), "{}/{} fallback is not an object", protocol.dimension(), ticker);
            }
        }
    }

    #[test]
    fn unknown_ticker_defaults_to_legn_dataset() {
        let unknown = fallback_for(AnalysisProtocol::Reality, "SMMT");
        let legn = fallback_for(AnalysisProtocol::Reality, "LEGN");

        assert_eq!(unknown, legn);
    }

    #[test]
    fn ticker_key_is_case_insensitive() {
        assert_eq!(
            fallback_for(AnalysisProtocol::Survival, "nvda"),
            fallback_for(AnalysisProtocol::Survival, "NVDA")
        );
    }

    #[test]
    fn tickers_get_distinct_datasets() {
        let legn = fallback_for(AnalysisProtocol::Competition, "LEGN");
        let nvda = fallback_for(AnalysisProtocol::Competition, "NVDA");
        let tsla = fallback_for(AnalysisProtocol::Competition, "TSLA");

        assert_ne!(legn, nvda);
        assert_ne!(nvda, tsla);
    }

    #[test]
    fn history_is_a_chronological_series() {
        let value = fallback_for(AnalysisProtocol::History, "LEGN");
        let series = value["revenue_history"].as_array().unwrap();

        assert_eq!(series.len(), 7);
        assert_eq!(series[0]["quarter"], "2024-Q1");
        assert_eq!(series[6]["quarter"], "2025-Q3");
    }

    #[test]
    fn pipeline_falls_back_to_explicit_marker() {
        let value = fallback_for(AnalysisProtocol::Pipeline, "LEGN");

        assert_eq!(value, serde_json::json!({"error": "Unknown protocol type"}));
    }
}
