use std::collections::HashMap;

use analysis_core::CompanyProfile;

/// Static directory of covered US-listed biotech and innovative pharma
/// companies. Lookup is case-insensitive; the canonical key is the uppercase
/// ticker. No mutation after construction.
pub struct CompanyDirectory {
    companies: Vec<CompanyProfile>,
    index: HashMap<String, usize>,
}

impl CompanyDirectory {
    pub fn new() -> Self {
        let companies = covered_companies();
        let index = companies
            .iter()
            .enumerate()
            .map(|(i, c)| (c.ticker.clone(), i))
            .collect();

        Self { companies, index }
    }

    /// Case-insensitive profile lookup. A miss is a user-facing condition
    /// (unsupported ticker), not a system error.
    pub fn lookup(&self, ticker: &str) -> Option<&CompanyProfile> {
        self.index
            .get(ticker.to_uppercase().as_str())
            .map(|&i| &self.companies[i])
    }

    /// All covered companies, in insertion order
    pub fn list_all(&self) -> &[CompanyProfile] {
        &self.companies
    }

    pub fn len(&self) -> usize {
        self.companies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.companies.is_empty()
    }
}

impl Default for CompanyDirectory {
    fn default() -> Self {
        Self::new()
    }
}

fn profile(
    ticker: &str,
    company_name: &str,
    company_name_cn: &str,
    cik: &str,
    sic: &str,
    sector: &str,
    focus: &str,
    key_products: &[&str],
    therapeutic_areas: &[&str],
) -> CompanyProfile {
    CompanyProfile {
        ticker: ticker.to_string(),
        company_name: company_name.to_string(),
        company_name_cn: company_name_cn.to_string(),
        cik: cik.to_string(),
        sic: sic.to_string(),
        sector: sector.to_string(),
        focus: focus.to_string(),
        key_products: key_products.iter().map(|s| s.to_string()).collect(),
        therapeutic_areas: therapeutic_areas.iter().map(|s| s.to_string()).collect(),
    }
}

fn covered_companies() -> Vec<CompanyProfile> {
    vec![
        profile(
            "LEGN",
            "Legend Biotech Corporation",
            "传奇生物",
            "0001801198",
            "2834",
            "Biotechnology",
            "CAR-T cell therapy",
            &["Carvykti (cilta-cel)"],
            &["Multiple myeloma", "Hematologic malignancies"],
        ),
        profile(
            "SMMT",
            "Summit Therapeutics Inc.",
            "Summit Therapeutics",
            "0001499620",
            "2834",
            "Biotechnology",
            "PD-1/VEGF bispecific antibody",
            &["Ivonescimab"],
            &["Non-small cell lung cancer", "Solid tumors"],
        ),
        profile(
            "LLY",
            "Eli Lilly and Company",
            "礼来",
            "0000059478",
            "2834",
            "Pharmaceuticals",
            "GLP-1 / diabetes / obesity",
            &["Mounjaro", "Zepbound", "Verzenio"],
            &["Diabetes", "Obesity", "Oncology"],
        ),
        profile(
            "MRNA",
            "Moderna, Inc.",
            "Moderna",
            "0001682852",
            "2836",
            "Biotechnology",
            "mRNA technology platform",
            &["Spikevax (COVID vaccine)"],
            &["Infectious disease", "Oncology", "Rare disease"],
        ),
        profile(
            "REGN",
            "Regeneron Pharmaceuticals, Inc.",
            "再生元",
            "0000872589",
            "2834",
            "Biotechnology",
            "Monoclonal antibodies",
            &["Eylea", "Dupixent", "Libtayo"],
            &["Ophthalmology", "Immunology", "Oncology"],
        ),
        profile(
            "VRTX",
            "Vertex Pharmaceuticals Incorporated",
            "福泰制药",
            "0000875320",
            "2834",
            "Biotechnology",
            "Gene therapy / cystic fibrosis",
            &["Trikafta", "Casgevy"],
            &["Cystic fibrosis", "Sickle cell disease", "Pain"],
        ),
        profile(
            "BMRN",
            "BioMarin Pharmaceutical Inc.",
            "BioMarin",
            "0001048477",
            "2834",
            "Biotechnology",
            "Rare diseases",
            &["Voxzogo", "Roctavian"],
            &["Achondroplasia", "Hemophilia A", "Rare disease"],
        ),
        profile(
            "ALNY",
            "Alnylam Pharmaceuticals, Inc.",
            "Alnylam",
            "0001178670",
            "2834",
            "Biotechnology",
            "RNAi therapeutics",
            &["Onpattro", "Amvuttra", "Givlaari"],
            &["Rare disease", "Cardiovascular", "Liver disease"],
        ),
    ]
}
