//! Microsoft (MSFT). Fiscal year ends in June.

use earnings_core::{Company, Result};
use earnings_html::Classifier;

use super::common::{self, names_in_section};
use crate::era::{CompanyProfile, Era};
use crate::statement::PeriodScope;

const SEGMENT_TITLES: &[&str] = &[
    "SEGMENT REVENUE AND OPERATING INCOME",
    "Segment Information",
];

const SEGMENTS: &[(&str, &str)] = &[
    (r"^productivity and business processes$", "productivityAndBusinessProcesses"),
    (r"^intelligent cloud$", "intelligentCloud"),
    (r"^more personal computing$", "morePersonalComputing"),
];

/// Microsoft extraction profile.
///
/// # Errors
///
/// Returns an error if a label pattern does not compile.
pub fn profile() -> Result<CompanyProfile> {
    let company =
        Company::new("microsoft", "Microsoft", "MSFT", "789019").with_fiscal_year_end(6);
    let revenue = names_in_section(SEGMENTS, r"^revenue");
    let profit = names_in_section(SEGMENTS, r"^operating income");
    Ok(CompanyProfile::new(company).era(
        Era::starting("three-segments", 2016, Classifier::inline())
            .with(common::standard(PeriodScope::Quarter)?)
            .with(common::segment_statements(SEGMENT_TITLES, &revenue, &profit)?),
    ))
}
