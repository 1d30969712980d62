//! Apple (AAPL). Fiscal year ends in September.
//!
//! The press release lists net sales by reportable segment and by category in
//! sections of one table and prints the cash flow statement fiscal year to date.
//! Segment operating income comes from the 10-Q, where each segment is a section
//! over `Net sales` and `Operating income` rows.

use earnings_core::{Company, DocumentType, Domain, FiscalPeriod, Quarter, Result};
use earnings_html::Classifier;

use super::common::{self, metric_under_names, names_in_section, restated};
use crate::era::{CompanyProfile, Era};
use crate::statement::{PeriodScope, StatementSpec};

const SEGMENT_TITLES: &[&str] = &["Net sales by reportable segment", "Net sales by category"];
const PROFIT_TITLES: &[&str] = &["Segment Information and Geographic Data", "segment operating income"];

const REGIONS: &[(&str, &str)] = &[
    (r"^americas$", "americas"),
    (r"^europe$", "europe"),
    (r"^greater china$", "greaterChina"),
    (r"^japan$", "japan"),
    (r"^rest of asia pacific$", "restOfAsiaPacific"),
];

const OTHER_PRODUCTS_CATEGORIES: &[(&str, &str)] = &[
    (r"^iphone", "iphone"),
    (r"^mac", "mac"),
    (r"^ipad", "ipad"),
    (r"^services", "services"),
    (r"^other products", "otherProducts"),
];

const WEARABLES_CATEGORIES: &[(&str, &str)] = &[
    (r"^iphone", "iphone"),
    (r"^mac", "mac"),
    (r"^ipad", "ipad"),
    (r"^wearables", "wearablesHomeAndAccessories"),
    (r"^services", "services"),
];

const REGION_SECTIONS: &[(&str, &str)] = &[
    (r"^americas", "americas"),
    (r"^europe", "europe"),
    (r"^greater china", "greaterChina"),
    (r"^japan", "japan"),
    (r"^rest of asia pacific", "restOfAsiaPacific"),
];

fn segments(categories: &[(&'static str, &'static str)]) -> Result<Vec<StatementSpec>> {
    let mut revenue = names_in_section(REGIONS, r"reportable segment");
    revenue.extend(names_in_section(categories, r"by category"));
    let segments = restated(StatementSpec::rows(Domain::Segments, SEGMENT_TITLES, &[&revenue])?);

    let profit = metric_under_names(REGION_SECTIONS, r"^operating income");
    let segment_profit = restated(
        StatementSpec::rows(Domain::SegmentProfit, PROFIT_TITLES, &[&profit])?
            .documents(&[DocumentType::Form10Q]),
    );
    Ok(vec![
        segments.annual(),
        segments,
        segment_profit.annual(),
        segment_profit,
    ])
}

/// Apple extraction profile.
///
/// # Errors
///
/// Returns an error if a label pattern does not compile.
pub fn profile() -> Result<CompanyProfile> {
    let company = Company::new("apple", "Apple", "AAPL", "320193").with_fiscal_year_end(9);
    Ok(CompanyProfile::new(company)
        .era(
            Era::starting("other-products", 2016, Classifier::inline())
                .until(FiscalPeriod::new(2018, Quarter::Q4))
                .with(common::standard(PeriodScope::YearToDate)?)
                .with(segments(OTHER_PRODUCTS_CATEGORIES)?),
        )
        .era(
            Era::starting("wearables", 2019, Classifier::inline())
                .with(common::standard(PeriodScope::YearToDate)?)
                .with(segments(WEARABLES_CATEGORIES)?),
        ))
}
