//! Netflix (NFLX). Statements are reported in thousands.

use earnings_core::{Company, FiscalPeriod, Quarter, Result};
use earnings_html::{Classifier, Rule};

use super::common;
use crate::era::{CompanyProfile, Era};
use crate::statement::{PeriodScope, StatementSpec};

/// Thousands to millions.
const THOUSANDS: f64 = 0.001;

const SEGMENT_TITLES: &[&str] = &["Segment Information", "Streaming Revenues"];

const LEGACY_SEGMENTS: &[Rule] = &[
    Rule::new(r"^domestic streaming$", "domesticStreaming"),
    Rule::new(r"^international streaming$", "internationalStreaming"),
    Rule::new(r"^domestic dvd$", "domesticDvd"),
];

const REGIONS: &[Rule] = &[
    Rule::new(r"^(united states and canada|ucan)\b", "ucan"),
    Rule::new(r"^(europe, middle east,? and africa|emea)\b", "emea"),
    Rule::new(r"^(latin america|latam)\b", "latam"),
    Rule::new(r"^(asia-pacific|apac)\b", "apac"),
];

fn in_thousands(specs: Vec<StatementSpec>) -> Vec<StatementSpec> {
    specs.into_iter().map(|spec| spec.scale(THOUSANDS)).collect()
}

fn statements(
    segments: &[Rule],
    revenue_row: &str,
    profit_row: Option<&str>,
) -> Result<Vec<StatementSpec>> {
    let mut specs = common::standard(PeriodScope::Quarter)?;
    specs.extend(common::transposed_segments(
        SEGMENT_TITLES,
        segments,
        revenue_row,
        profit_row,
    )?);
    Ok(in_thousands(specs))
}

/// Netflix extraction profile.
///
/// # Errors
///
/// Returns an error if a label pattern does not compile.
pub fn profile() -> Result<CompanyProfile> {
    let company = Company::new("netflix", "Netflix", "NFLX", "1065280");
    Ok(CompanyProfile::new(company)
        .era(
            Era::starting("legacy", 2016, Classifier::LegacyAlign)
                .until(FiscalPeriod::new(2019, Quarter::Q4))
                .with(statements(
                    LEGACY_SEGMENTS,
                    r"^revenues",
                    Some(r"^contribution profit"),
                )?),
        )
        .era(
            Era::starting("regional", 2020, Classifier::inline())
                .with(statements(REGIONS, r"^(streaming )?revenues", None)?),
        ))
}
