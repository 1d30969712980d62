//! NVIDIA (NVDA). Fiscal year ends in late January.
//!
//! Press releases go out through GlobeNewswire and mark labels and figures with
//! CSS classes; the 10-Q uses inline styles. Segment figures come from the
//! 10-Q segment note, a matrix with one column per segment whose order is not
//! stable between filings.

use earnings_core::{Company, DocumentType, FiscalPeriod, Quarter, Result};
use earnings_html::{Classifier, Rule};

use super::common;
use crate::era::{CompanyProfile, Era};
use crate::statement::{PeriodScope, StatementSpec};

const SEGMENT_TITLES: &[&str] = &["Segment Information"];
const REVENUE_ROW: &str = r"^revenue";
const PROFIT_ROW: &str = r"^operating income";

const GPU_TEGRA: &[Rule] = &[
    Rule::new(r"^gpu$", "gpu"),
    Rule::new(r"^tegra processor$", "tegraProcessor"),
];

const COMPUTE_GRAPHICS: &[Rule] = &[
    Rule::new(r"^compute (&|and) networking$", "computeAndNetworking"),
    Rule::new(r"^graphics$", "graphics"),
];

/// Splits specs read from press releases into a GlobeNewswire variant, leaving
/// filings on the era's inline style classifier.
fn by_document(specs: Vec<StatementSpec>) -> Vec<StatementSpec> {
    let mut split = Vec::with_capacity(specs.len() * 2);
    for spec in specs {
        if !spec.applies_to(DocumentType::PressRelease) {
            split.push(spec);
            continue;
        }
        let filings: Vec<DocumentType> = spec
            .documents
            .iter()
            .copied()
            .filter(|document| *document != DocumentType::PressRelease)
            .collect();
        if !filings.is_empty() {
            split.push(spec.clone().documents(&filings));
        }
        split.push(
            spec.documents(&[DocumentType::PressRelease])
                .classifier(Classifier::globe_newswire()),
        );
    }
    split
}

fn statements(segments: &[Rule]) -> Result<Vec<StatementSpec>> {
    let mut specs = common::standard(PeriodScope::Quarter)?;
    specs.extend(common::transposed_segments(
        SEGMENT_TITLES,
        segments,
        REVENUE_ROW,
        Some(PROFIT_ROW),
    )?);
    Ok(by_document(specs))
}

/// NVIDIA extraction profile.
///
/// # Errors
///
/// Returns an error if a label pattern does not compile.
pub fn profile() -> Result<CompanyProfile> {
    let company = Company::new("nvidia", "NVIDIA", "NVDA", "1045810").with_fiscal_year_end(1);
    Ok(CompanyProfile::new(company)
        .era(
            Era::starting("gpu-tegra", 2016, Classifier::inline())
                .until(FiscalPeriod::new(2021, Quarter::Q1))
                .with(statements(GPU_TEGRA)?),
        )
        .era(
            Era::starting("compute-graphics", 2021, Classifier::inline())
                .since(FiscalPeriod::new(2021, Quarter::Q2))
                .with(statements(COMPUTE_GRAPHICS)?),
        ))
}
