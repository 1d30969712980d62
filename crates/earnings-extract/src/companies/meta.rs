//! Meta Platforms (META). Segment reporting starts in Q4 2021.

use earnings_core::{Company, FiscalPeriod, Quarter, Result};
use earnings_html::Classifier;

use super::common::{self, names_in_section};
use crate::era::{CompanyProfile, Era};
use crate::statement::PeriodScope;

const SEGMENT_TITLES: &[&str] = &["Segment Results", "Segment Information"];

const SEGMENTS: &[(&str, &str)] = &[
    (r"^family of apps", "familyOfApps"),
    (r"^reality labs", "realityLabs"),
];

/// Meta extraction profile.
///
/// # Errors
///
/// Returns an error if a label pattern does not compile.
pub fn profile() -> Result<CompanyProfile> {
    let company = Company::new("meta", "Meta Platforms", "META", "1326801");
    let revenue = names_in_section(SEGMENTS, r"^revenue");
    let profit = names_in_section(SEGMENTS, r"^income \(loss\) from operations|^operating income");
    Ok(CompanyProfile::new(company)
        .era(
            Era::starting("single-segment", 2016, Classifier::inline())
                .until(FiscalPeriod::new(2021, Quarter::Q3))
                .with(common::standard(PeriodScope::Quarter)?),
        )
        .era(
            Era::starting("apps-reality-labs", 2021, Classifier::inline())
                .since(FiscalPeriod::new(2021, Quarter::Q4))
                .with(common::standard(PeriodScope::Quarter)?)
                .with(common::segment_statements(SEGMENT_TITLES, &revenue, &profit)?),
        ))
}
