//! The fixed analysis protocol set.
//!
//! Each protocol is a prompt template defining a role, task instructions and a
//! strict JSON output shape for one dimension of the composite report.

/// One of the five fixed analysis protocols
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalysisProtocol {
    Reality,
    Survival,
    Competition,
    History,
    Pipeline,
}

impl AnalysisProtocol {
    pub const ALL: [AnalysisProtocol; 5] = [
        AnalysisProtocol::Reality,
        AnalysisProtocol::Survival,
        AnalysisProtocol::Competition,
        AnalysisProtocol::History,
        AnalysisProtocol::Pipeline,
    ];

    /// Name of the report dimension this protocol populates
    pub fn dimension(&self) -> &'static str {
        match self {
            AnalysisProtocol::Reality => "reality",
            AnalysisProtocol::Survival => "survival",
            AnalysisProtocol::Competition => "competition",
            AnalysisProtocol::History => "history",
            AnalysisProtocol::Pipeline => "pipeline",
        }
    }

    /// Role and task instructions, including the expected output schema
    pub fn instructions(&self) -> &'static str {
        match self {
            AnalysisProtocol::Reality => REALITY_INSTRUCTIONS,
            AnalysisProtocol::Survival => SURVIVAL_INSTRUCTIONS,
            AnalysisProtocol::Competition => COMPETITION_INSTRUCTIONS,
            AnalysisProtocol::History => HISTORY_INSTRUCTIONS,
            AnalysisProtocol::Pipeline => PIPELINE_INSTRUCTIONS,
        }
    }

    /// Protocol-specific directive appended after the shared context blocks
    pub fn directive(&self) -> &'static str {
        match self {
            AnalysisProtocol::Reality => {
                "Analyze this company's underlying business identity."
            }
            AnalysisProtocol::Survival => {
                "Analyze financial survivability and extract the latest financial metrics."
            }
            AnalysisProtocol::Competition => {
                "Analyze the competitive landscape, focusing on same-target and same-indication rivals."
            }
            AnalysisProtocol::History => {
                "Extract revenue data for the most recent 6-8 quarters."
            }
            AnalysisProtocol::Pipeline => {
                "Analyze the company's R&D pipeline, including the clinical stage and expected milestones for each program."
            }
        }
    }
}

const REALITY_INSTRUCTIONS: &str = r#"
Role: Senior biotech sector analyst.
Task: Analyze the gap between the company's narrative and its economic substance.

From the company information provided, identify:
1. Narrative identity: how the company presents itself (e.g. "innovative biotech platform company").
2. Economic identity: the actual nature of the business based on where revenue comes from (e.g. "single-product commercial-stage company").
3. Reality gap score: 1-10 (higher means a wider gap between narrative and reality).

For biotech companies, weigh in particular:
- Marketed products versus pure R&D stage
- Product sales versus partnership milestone payments as the revenue source
- Real platform value versus market hype

Constraint: use zero marketing adjectives. Use simple, brutal nouns.

Return ONLY a JSON object in this exact format:
{
  "narrative_label": "the identity the company claims",
  "economic_label": "the actual economic identity",
  "reality_gap_score": 7,
  "key_insight": "one-sentence core insight"
}
"#;

const SURVIVAL_INSTRUCTIONS: &str = r#"
Role: Biotech financial analyst.
Task: Assess financial survivability and extract key financial metrics.

From the company's financial data, provide:
1. Latest quarterly revenue (USD millions)
2. Latest quarterly net income (USD millions)
3. Cash reserves (USD millions)
4. Year-over-year revenue change (percent)
5. Cash runway (months of operation remaining; null for profitable companies)
6. R&D intensity (R&D spend / total revenue)
7. Key financial risks

For biotech companies, pay particular attention to:
- R&D intensity (often above 50% of revenue)
- Cash burn rate
- Whether near-term financing is needed
- Sustainability of partnership milestone payments

IMPORTANT: Use the most recent financial data available.
IMPORTANT: If exact figures are unavailable, give a reasonable estimate based on the company's type and stage.

Return ONLY a JSON object in this exact format:
{
  "quarterly_revenue": 150.5,
  "revenue_change_yoy": "+25%",
  "net_income": -45.2,
  "net_income_change": "-15%",
  "cash_position": 520.0,
  "cash_change": "-8%",
  "runway_months": 18,
  "rd_intensity": "65%",
  "financial_health": "assessment of financial health",
  "key_risks": ["risk 1", "risk 2"]
}
"#;

const COMPETITION_INSTRUCTIONS: &str = r#"
Role: Biotech industry strategist.
Task: Analyze the competitive landscape and market dynamics.

Identify:
1. 2-3 DIRECT competitors (same target / same indication)
2. The "Kill Switch" - the single factor that determines success or failure
3. Market dynamics

For biotech companies, focus the analysis on:
- Clinical progress of same-target rivals
- Indication market size and competitive structure
- Differentiation (efficacy, safety, route of administration)
- Regulatory approval risk

Return ONLY a JSON object in this exact format:
{
  "competitors": ["competitor 1", "competitor 2"],
  "kill_switch": "the single factor that decides success or failure",
  "market_dynamics": "market dynamics analysis",
  "competitive_advantage": "core competitive advantage"
}
"#;

const HISTORY_INSTRUCTIONS: &str = r#"
Role: Financial data analyst.
Task: Extract historical quarterly revenue data for charting.

From the company's financial reports, extract revenue for the most recent 6-8 quarters.

IMPORTANT: Use figures actually reported in regulatory filings.
IMPORTANT: Return quarters in chronological order (earliest first).
IMPORTANT: If actual figures are unavailable, give a reasonable estimate based on the company's stage.

Return ONLY a JSON object in this exact format:
{
  "revenue_history": [
    {"quarter": "2024-Q1", "revenue": 85.5},
    {"quarter": "2024-Q2", "revenue": 95.2},
    {"quarter": "2024-Q3", "revenue": 108.7},
    {"quarter": "2024-Q4", "revenue": 120.3},
    {"quarter": "2025-Q1", "revenue": 135.0},
    {"quarter": "2025-Q2", "revenue": 148.5},
    {"quarter": "2025-Q3", "revenue": 162.0}
  ]
}
"#;

const PIPELINE_INSTRUCTIONS: &str = r#"
Role: Biotech pipeline analyst.
Task: Analyze the company's drug development pipeline.

From the company information, analyze:
1. Core pipeline programs (the 2-4 most important)
2. Development stage of each program (Preclinical / Phase 1 / Phase 2 / Phase 3 / Approved)
3. Target indications
4. Expected timing of key milestones
5. Overall pipeline assessment

Stage definitions:
- Preclinical: animal studies
- Phase 1: safety testing, typically 20-80 subjects
- Phase 2: initial efficacy, typically 100-300 subjects
- Phase 3: large-scale efficacy, typically 1000-3000 subjects
- Approved: cleared by FDA/EMA

Return ONLY a JSON object in this exact format:
{
  "pipeline": [
    {
      "name": "drug name",
      "stage": "Phase 3",
      "indication": "target indication",
      "milestone": "Phase 3 readout expected Q2 2025",
      "partner": "partner (if any)"
    }
  ],
  "pipeline_strength": "overall pipeline assessment",
  "near_term_catalysts": ["catalyst 1", "catalyst 2"],
  "pipeline_risks": ["pipeline risk 1", "pipeline risk 2"]
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_protocols_have_distinct_dimensions() {
        let mut dimensions: Vec<&str> = AnalysisProtocol::ALL.iter().map(|p| p.dimension()).collect();
        dimensions.sort();
        dimensions.dedup();

        assert_eq!(dimensions.len(), AnalysisProtocol::ALL.len());
    }

    #[test]
    fn instructions_demand_strict_json_output() {
        for protocol in AnalysisProtocol::ALL {
            assert!(
                protocol.instructions().contains("Return ONLY a JSON object"),
                "{} is missing its output constraint",
                protocol.dimension()
            );
        }
    }
}
