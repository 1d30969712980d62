//! Amazon (AMZN).

use earnings_core::{Company, Result};
use earnings_html::Classifier;

use super::common::{self, names_in_section};
use crate::era::{CompanyProfile, Era};
use crate::statement::PeriodScope;

const SEGMENT_TITLES: &[&str] = &["Segment Information", "Segment Results"];

const SEGMENTS: &[(&str, &str)] = &[
    (r"^north america$", "northAmerica"),
    (r"^international$", "international"),
    (r"^aws$|^amazon web services$", "aws"),
];

/// Amazon extraction profile.
///
/// # Errors
///
/// Returns an error if a label pattern does not compile.
pub fn profile() -> Result<CompanyProfile> {
    let company = Company::new("amazon", "Amazon", "AMZN", "1018724");
    let revenue = names_in_section(SEGMENTS, r"^net sales");
    let profit = names_in_section(SEGMENTS, r"^operating income");
    Ok(CompanyProfile::new(company).era(
        Era::starting("three-segments", 2016, Classifier::inline())
            .with(common::standard(PeriodScope::Quarter)?)
            .with(common::segment_statements(SEGMENT_TITLES, &revenue, &profit)?),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use earnings_core::{DocumentType, Domain, FiscalPeriod, Quarter};

    use crate::statement::extract_statement;

    #[test]
    fn test_segment_information() {
        let html = r#"<p>Segment Information</p>
            <table>
              <tr><td></td><td colspan="2" style="text-align:center">Three Months Ended June 30,</td></tr>
              <tr><td></td><td style="text-align:center">2023</td><td style="text-align:center">2024</td></tr>
              <tr><td style="text-align:left">Net sales:</td></tr>
              <tr><td style="text-align:left">North America</td><td style="text-align:right">82,546</td><td style="text-align:right">90,033</td></tr>
              <tr><td style="text-align:left">International</td><td style="text-align:right">29,697</td><td style="text-align:right">31,663</td></tr>
              <tr><td style="text-align:left">AWS</td><td style="text-align:right">22,140</td><td style="text-align:right">26,281</td></tr>
              <tr><td style="text-align:left">Operating income (loss):</td></tr>
              <tr><td style="text-align:left">International</td><td style="text-align:right">(895)</td><td style="text-align:right">273</td></tr>
            </table>"#;
        let profile = profile().unwrap();
        let period = FiscalPeriod::new(2024, Quarter::Q2);
        let specs = profile.dispatch(period, Domain::Segments, DocumentType::PressRelease);
        let (spec, classifier) = specs[0];
        let extraction = extract_statement(html, spec, classifier).unwrap();
        assert_eq!(extraction.current.get("aws"), Some(26281.0));
        assert_eq!(extraction.current.get("international"), Some(31663.0));

        let specs = profile.dispatch(period, Domain::SegmentProfit, DocumentType::PressRelease);
        let (spec, classifier) = specs[0];
        let extraction = extract_statement(html, spec, classifier).unwrap();
        assert_eq!(extraction.current.get("international"), Some(273.0));
        assert_eq!(extraction.comparative.unwrap().get("international"), Some(-895.0));
    }
}
