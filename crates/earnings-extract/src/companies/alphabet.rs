//! Alphabet (GOOGL).
//!
//! Segments changed in Q4 2020 from Google / Other Bets to Google Services /
//! Google Cloud / Other Bets. The balance sheet header puts the date and the
//! year on one line in some quarters and on two in others; header year
//! detection handles both without a separate era.

use earnings_core::{Company, FiscalPeriod, Quarter, Result};
use earnings_html::Classifier;

use super::common::{self, names_in_section};
use crate::era::{CompanyProfile, Era};
use crate::statement::{PeriodScope, StatementSpec};

const SEGMENT_TITLES: &[&str] = &["Segment Results", "Segment Information"];
const REVENUES: &str = r"^revenues";
const OPERATING_INCOME: &str = r"^operating income";

const GOOGLE_OTHER_BETS: &[(&str, &str)] = &[
    (r"^google$", "google"),
    (r"^other bets$", "otherBets"),
];

const SERVICES_CLOUD: &[(&str, &str)] = &[
    (r"^google services$", "googleServices"),
    (r"^google cloud$", "googleCloud"),
    (r"^other bets$", "otherBets"),
];

const REVENUE_ONLY: &[(&str, &str)] = &[(r"^hedging gains", "hedgingGains")];
const PROFIT_ONLY: &[(&str, &str)] = &[(r"^alphabet-level activities$", "alphabetLevelActivities")];

fn segments(names: &[(&'static str, &'static str)]) -> Result<Vec<StatementSpec>> {
    let mut revenue = names_in_section(names, REVENUES);
    revenue.extend(names_in_section(REVENUE_ONLY, REVENUES));
    let mut profit = names_in_section(names, OPERATING_INCOME);
    profit.extend(names_in_section(PROFIT_ONLY, OPERATING_INCOME));
    common::segment_statements(SEGMENT_TITLES, &revenue, &profit)
}

/// Alphabet extraction profile.
///
/// # Errors
///
/// Returns an error if a label pattern does not compile.
pub fn profile() -> Result<CompanyProfile> {
    let company = Company::new("alphabet", "Alphabet", "GOOGL", "1652044");
    Ok(CompanyProfile::new(company)
        .era(
            Era::starting("google-other-bets", 2016, Classifier::inline())
                .until(FiscalPeriod::new(2020, Quarter::Q3))
                .with(common::standard(PeriodScope::Quarter)?)
                .with(segments(GOOGLE_OTHER_BETS)?),
        )
        .era(
            Era::starting("services-cloud", 2020, Classifier::inline())
                .since(FiscalPeriod::new(2020, Quarter::Q4))
                .with(common::standard(PeriodScope::Quarter)?)
                .with(segments(SERVICES_CLOUD)?),
        ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use earnings_core::{DocumentType, Domain};

    use crate::statement::extract_statement;

    const SEGMENT_RESULTS: &str = r#"
        <p style="text-align:center"><b>Segment Results</b></p>
        <table>
          <tr><td></td><td colspan="6" style="text-align:center">Three Months Ended June 30,</td></tr>
          <tr><td></td><td colspan="3" style="text-align:center">2023</td><td colspan="3" style="text-align:center">2024</td></tr>
          <tr><td style="text-align:left">Revenues:</td></tr>
          <tr><td style="text-align:left">Google Services</td><td>$</td><td style="text-align:right">66,285</td><td></td><td>$</td><td style="text-align:right">73,928</td><td></td></tr>
          <tr><td style="text-align:left">Google Cloud</td><td></td><td style="text-align:right">8,031</td><td></td><td></td><td style="text-align:right">10,347</td><td></td></tr>
          <tr><td style="text-align:left">Other Bets</td><td></td><td style="text-align:right">285</td><td></td><td></td><td style="text-align:right">365</td><td></td></tr>
          <tr><td style="text-align:left">Hedging gains (losses)</td><td></td><td style="text-align:right">3</td><td></td><td></td><td style="text-align:right">102</td><td></td></tr>
          <tr><td style="text-align:left">Total revenues</td><td>$</td><td style="text-align:right">74,604</td><td></td><td>$</td><td style="text-align:right">84,742</td><td></td></tr>
          <tr><td style="text-align:left">Operating income (loss):</td></tr>
          <tr><td style="text-align:left">Google Services</td><td>$</td><td style="text-align:right">23,454</td><td></td><td>$</td><td style="text-align:right">29,674</td><td></td></tr>
          <tr><td style="text-align:left">Google Cloud</td><td></td><td style="text-align:right">395</td><td></td><td></td><td style="text-align:right">1,172</td><td></td></tr>
          <tr><td style="text-align:left">Other Bets</td><td></td><td style="text-align:right">(813</td><td>)</td><td></td><td style="text-align:right">(1,134</td><td>)</td></tr>
          <tr><td style="text-align:left">Alphabet-level activities</td><td></td><td style="text-align:right">(1,683</td><td>)</td><td></td><td style="text-align:right">(2,287</td><td>)</td></tr>
        </table>"#;

    #[test]
    fn test_segments_by_section() {
        let profile = profile().unwrap();
        let period = FiscalPeriod::new(2024, Quarter::Q2);
        let revenue = profile.dispatch(period, Domain::Segments, DocumentType::PressRelease);
        assert_eq!(revenue.len(), 1);
        let (spec, classifier) = revenue[0];
        let extraction = extract_statement(SEGMENT_RESULTS, spec, classifier).unwrap();
        assert_eq!(extraction.current.get("googleServices"), Some(73928.0));
        assert_eq!(extraction.current.get("googleCloud"), Some(10347.0));
        assert_eq!(extraction.current.get("hedgingGains"), Some(102.0));
        assert_eq!(extraction.comparative.unwrap().get("googleCloud"), Some(8031.0));

        let profit = profile.dispatch(period, Domain::SegmentProfit, DocumentType::PressRelease);
        let (spec, classifier) = profit[0];
        let extraction = extract_statement(SEGMENT_RESULTS, spec, classifier).unwrap();
        assert_eq!(extraction.current.get("googleServices"), Some(29674.0));
        assert_eq!(extraction.current.get("otherBets"), Some(-1134.0));
        assert_eq!(extraction.current.get("alphabetLevelActivities"), Some(-2287.0));
    }

    #[test]
    fn test_segment_eras() {
        let profile = profile().unwrap();
        assert_eq!(
            profile.era_for(FiscalPeriod::new(2020, Quarter::Q3)).unwrap().name,
            "google-other-bets"
        );
        assert_eq!(
            profile.era_for(FiscalPeriod::new(2020, Quarter::Q4)).unwrap().name,
            "services-cloud"
        );
    }
}
