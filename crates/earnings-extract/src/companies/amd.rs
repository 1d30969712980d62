//! Advanced Micro Devices (AMD).
//!
//! The segment table puts each segment name on its own line, followed by
//! `Net revenue` and `Operating income (loss)` rows.

use earnings_core::{Company, FiscalPeriod, Quarter, Result};
use earnings_html::Classifier;

use super::common::{self, metric_under_names};
use crate::era::{CompanyProfile, Era};
use crate::statement::{PeriodScope, StatementSpec};

const SEGMENT_TITLES: &[&str] = &[
    "Summary of Segment Results",
    "Segment and Category Information",
    "Segment Information",
];
const NET_REVENUE: &str = r"^net revenue";
const OPERATING_INCOME: &str = r"^operating income";

const COMPUTING_ENTERPRISE: &[(&str, &str)] = &[
    (r"^computing and graphics", "computingAndGraphics"),
    (r"^enterprise, embedded and semi-custom", "enterpriseEmbeddedAndSemiCustom"),
];

const FOUR_SEGMENTS: &[(&str, &str)] = &[
    (r"^data center", "dataCenter"),
    (r"^client", "client"),
    (r"^gaming", "gaming"),
    (r"^embedded", "embedded"),
];

fn statements(segments: &[(&'static str, &'static str)]) -> Result<Vec<StatementSpec>> {
    let revenue = metric_under_names(segments, NET_REVENUE);
    let profit = metric_under_names(segments, OPERATING_INCOME);
    let mut specs = common::standard(PeriodScope::Quarter)?;
    specs.extend(common::segment_statements(SEGMENT_TITLES, &revenue, &profit)?);
    Ok(specs)
}

/// AMD extraction profile.
///
/// # Errors
///
/// Returns an error if a label pattern does not compile.
pub fn profile() -> Result<CompanyProfile> {
    let company = Company::new("amd", "AMD", "AMD", "2488");
    Ok(CompanyProfile::new(company)
        .era(
            Era::starting("computing-enterprise", 2016, Classifier::inline())
                .until(FiscalPeriod::new(2022, Quarter::Q1))
                .with(statements(COMPUTING_ENTERPRISE)?),
        )
        .era(
            Era::starting("four-segments", 2022, Classifier::inline())
                .since(FiscalPeriod::new(2022, Quarter::Q2))
                .with(statements(FOUR_SEGMENTS)?),
        ))
}
