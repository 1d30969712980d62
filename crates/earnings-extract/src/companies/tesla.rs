//! Tesla (TSLA).
//!
//! Tesla publishes a PDF update deck instead of an HTML press release. Each
//! statement shows five quarters, oldest first: the last column is the current
//! quarter and the first one the same quarter a year earlier.

use earnings_core::{Company, DocumentType, Domain, Result};
use earnings_html::{Classifier, ColumnPick, Rule};

use super::common::{BALANCE_SHEET, CASH_FLOW, INCOME, SHARES_AND_EPS};
use crate::era::{CompanyProfile, Era};
use crate::statement::{ComparativeTarget, StatementSpec};

const INCOME_TITLES: &[&str] = &["Income Statement"];
const BALANCE_TITLES: &[&str] = &["Balance Sheet"];
const CASH_FLOW_TITLES: &[&str] = &["Cash Flows"];

const DECK_INCOME: &[Rule] = &[
    Rule::new(r"^total gross profit$", "grossProfit"),
    Rule::new(r"^eps attributable to common stockholders, basic", "epsBasic").unscaled().non_additive(),
    Rule::new(r"^eps attributable to common stockholders, diluted", "epsDiluted").unscaled().non_additive(),
];

const SEGMENTS: &[Rule] = &[
    Rule::new(r"^total automotive revenues", "automotive"),
    Rule::new(r"^energy generation and storage( segment)? revenue", "energyGenerationAndStorage"),
    Rule::new(r"^services and other revenue", "servicesAndOther"),
];

const SEGMENT_PROFIT: &[Rule] = &[
    Rule::new(r"^total automotive gross profit|^automotive gross profit", "automotive"),
    Rule::new(
        r"^energy generation and storage( segment)? gross profit",
        "energyGenerationAndStorage",
    ),
    Rule::new(r"^services and other gross profit", "servicesAndOther"),
];

/// A deck statement: last column, press release only.
fn deck(domain: Domain, titles: &[&str], rules: &[&[Rule]]) -> Result<StatementSpec> {
    Ok(StatementSpec::rows(domain, titles, rules)?
        .column(ColumnPick::Last)
        .documents(&[DocumentType::PressRelease]))
}

/// Reads the year-ago column as well.
const fn with_year_ago(spec: StatementSpec) -> StatementSpec {
    spec.comparative(ColumnPick::Index(0), ComparativeTarget::YearAgo)
}

fn statements() -> Result<Vec<StatementSpec>> {
    Ok(vec![
        with_year_ago(deck(Domain::Financials, INCOME_TITLES, &[DECK_INCOME, INCOME, SHARES_AND_EPS])?),
        deck(Domain::BalanceSheet, BALANCE_TITLES, &[BALANCE_SHEET])?,
        deck(Domain::CashFlow, CASH_FLOW_TITLES, &[CASH_FLOW])?,
        with_year_ago(deck(Domain::Segments, INCOME_TITLES, &[SEGMENTS])?),
        with_year_ago(deck(Domain::SegmentProfit, INCOME_TITLES, &[SEGMENT_PROFIT])?),
    ])
}

/// Tesla extraction profile.
///
/// # Errors
///
/// Returns an error if a label pattern does not compile.
pub fn profile() -> Result<CompanyProfile> {
    let company = Company::new("tesla", "Tesla", "TSLA", "1318605");
    Ok(CompanyProfile::new(company)
        .era(Era::starting("update-deck", 2019, Classifier::PlainText).with(statements()?)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use earnings_core::{FiscalPeriod, Quarter};

    use crate::statement::extract_statement;

    const DECK: &str = "F I N A N C I A L   S U M M A R Y\n\
        (Unaudited)\n\
        ($ in millions, except percentages and per share data) Q2-2023 Q3-2023 Q4-2023 Q1-2024 Q2-2024\n\
        Total automotive revenues 20,419 19,625 21,563 17,378 19,878\n\
        Energy generation and storage revenue 1,509 1,559 1,438 1,635 3,014\n\
        Services and other revenue 2,150 2,166 2,166 2,288 2,608\n\
        Total revenues 24,927 23,350 25,167 21,301 25,500\n\
        Total automotive gross profit 4,178 3,280 3,390 2,616 3,278\n\
        Total gross profit 4,533 4,178 4,438 3,696 4,578\n\
        Income from operations 2,399 1,764 2,064 1,171 1,605\n\
        EPS attributable to common stockholders, diluted (GAAP) 0.78 0.53 2.27 0.34 0.42\n";

    #[test]
    fn test_deck_last_and_year_ago_columns() {
        let profile = profile().unwrap();
        let period = FiscalPeriod::new(2024, Quarter::Q2);

        let specs = profile.dispatch(period, Domain::Financials, DocumentType::PressRelease);
        assert_eq!(specs.len(), 1);
        let (spec, classifier) = specs[0];
        let extraction = extract_statement(DECK, spec, classifier).unwrap();
        assert_eq!(extraction.current.get("revenue"), Some(25500.0));
        assert_eq!(extraction.current.get("grossProfit"), Some(4578.0));
        assert_eq!(extraction.current.get("operatingIncome"), Some(1605.0));
        assert_eq!(extraction.current.get("epsDiluted"), Some(0.42));
        assert_eq!(extraction.comparative.unwrap().get("revenue"), Some(24927.0));

        let specs = profile.dispatch(period, Domain::Segments, DocumentType::PressRelease);
        let (spec, classifier) = specs[0];
        let extraction = extract_statement(DECK, spec, classifier).unwrap();
        assert_eq!(extraction.current.get("automotive"), Some(19878.0));
        assert_eq!(extraction.current.get("energyGenerationAndStorage"), Some(3014.0));

        let specs = profile.dispatch(period, Domain::SegmentProfit, DocumentType::PressRelease);
        let (spec, classifier) = specs[0];
        let extraction = extract_statement(DECK, spec, classifier).unwrap();
        assert_eq!(extraction.current.get("automotive"), Some(3278.0));
    }

    #[test]
    fn test_deck_only() {
        let profile = profile().unwrap();
        let period = FiscalPeriod::new(2024, Quarter::Q2);
        assert!(profile.dispatch(period, Domain::Financials, DocumentType::Form10Q).is_empty());
        assert!(profile.era_for(FiscalPeriod::new(2018, Quarter::Q4)).is_none());
    }
}
