//! Intel (INTC).
//!
//! Intel reorganized its operating segments three times since 2016. Each
//! taxonomy is its own era; the statements and markup are otherwise unchanged.

use earnings_core::{Company, FiscalPeriod, Quarter, Result};
use earnings_html::Classifier;

use super::common::{self, names_in_section};
use crate::era::{CompanyProfile, Era};
use crate::statement::{PeriodScope, StatementSpec};

const SEGMENT_TITLES: &[&str] = &[
    "SUPPLEMENTAL OPERATING SEGMENT RESULTS",
    "Operating Segment Results",
    "Segment Information",
];
const REVENUE: &str = r"^(net )?revenue";
const OPERATING_INCOME: &str = r"^operating income";

const CCG: (&str, &str) = (r"^client computing( group)?$|^ccg$", "ccg");
const DCAI: (&str, &str) = (r"^data ?center and ai$|^dcai$", "dcai");
const NEX: (&str, &str) = (r"^network and edge$|^nex$", "nex");
const MOBILEYE: (&str, &str) = (r"^mobileye$", "mobileye");
const IFS: (&str, &str) = (r"^intel foundry services$|^ifs$", "ifs");

const CCG_DCG: &[(&str, &str)] = &[
    CCG,
    (r"^data center( group)?$|^dcg$", "dcg"),
    (r"^internet of things( group)?$|^iotg$", "iotg"),
    MOBILEYE,
    (r"^non-volatile memory solutions group$|^nsg$", "nsg"),
    (r"^programmable solutions( group)?$|^psg$", "psg"),
];

const DCAI_NEX: &[(&str, &str)] = &[
    CCG,
    DCAI,
    NEX,
    (r"^accelerated computing systems and graphics$|^axg$", "axg"),
    MOBILEYE,
    IFS,
];

const INTERNAL_FOUNDRY: &[(&str, &str)] = &[CCG, DCAI, NEX, MOBILEYE, IFS];

const PRODUCTS_FOUNDRY: &[(&str, &str)] = &[
    CCG,
    DCAI,
    NEX,
    (r"^intel foundry$", "intelFoundry"),
    (r"^altera$", "altera"),
    MOBILEYE,
];

fn statements(segments: &[(&'static str, &'static str)]) -> Result<Vec<StatementSpec>> {
    let revenue = names_in_section(segments, REVENUE);
    let profit = names_in_section(segments, OPERATING_INCOME);
    let mut specs = common::standard(PeriodScope::Quarter)?;
    specs.extend(common::segment_statements(SEGMENT_TITLES, &revenue, &profit)?);
    Ok(specs)
}

/// Intel extraction profile.
///
/// # Errors
///
/// Returns an error if a label pattern does not compile.
pub fn profile() -> Result<CompanyProfile> {
    let company = Company::new("intel", "Intel", "INTC", "50863");
    Ok(CompanyProfile::new(company)
        .era(
            Era::starting("ccg-dcg", 2016, Classifier::inline())
                .until(FiscalPeriod::new(2021, Quarter::Q4))
                .with(statements(CCG_DCG)?),
        )
        .era(
            Era::starting("dcai-nex", 2022, Classifier::inline())
                .until(FiscalPeriod::new(2022, Quarter::Q4))
                .with(statements(DCAI_NEX)?),
        )
        .era(
            Era::starting("internal-foundry", 2023, Classifier::inline())
                .until(FiscalPeriod::new(2023, Quarter::Q4))
                .with(statements(INTERNAL_FOUNDRY)?),
        )
        .era(
            Era::starting("products-foundry", 2024, Classifier::inline())
                .with(statements(PRODUCTS_FOUNDRY)?),
        ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use earnings_core::{DocumentType, Domain};

    use crate::statement::extract_statement;

    const SEGMENT_RESULTS: &str = r#"<p>SUPPLEMENTAL OPERATING SEGMENT RESULTS</p>
        <table>
          <tr><td></td><td colspan="2" style="text-align:center">Three Months Ended</td></tr>
          <tr><td></td><td style="text-align:center">Jun 29, 2024</td><td style="text-align:center">Jul 1, 2023</td></tr>
          <tr><td style="text-align:left">Net Revenue:</td></tr>
          <tr><td style="text-align:left">Client Computing</td><td style="text-align:right">7,411</td><td style="text-align:right">6,784</td></tr>
          <tr><td style="text-align:left">Data Center and AI</td><td style="text-align:right">3,049</td><td style="text-align:right">3,114</td></tr>
          <tr><td style="text-align:left">Network and Edge</td><td style="text-align:right">1,344</td><td style="text-align:right">1,364</td></tr>
          <tr><td style="text-align:left">Total Intel Products</td><td style="text-align:right">11,804</td><td style="text-align:right">11,262</td></tr>
          <tr><td style="text-align:left">Intel Foundry</td><td style="text-align:right">4,320</td><td style="text-align:right">4,171</td></tr>
          <tr><td style="text-align:left">Altera</td><td style="text-align:right">361</td><td style="text-align:right">848</td></tr>
          <tr><td style="text-align:left">Mobileye</td><td style="text-align:right">440</td><td style="text-align:right">454</td></tr>
          <tr><td style="text-align:left">Operating income (loss):</td></tr>
          <tr><td style="text-align:left">Intel Foundry</td><td style="text-align:right">(2,830</td><td>)</td><td style="text-align:right">(1,869</td><td>)</td></tr>
        </table>"#;

    #[test]
    fn test_products_foundry_segments() {
        let profile = profile().unwrap();
        let period = FiscalPeriod::new(2024, Quarter::Q2);
        let specs = profile.dispatch(period, Domain::Segments, DocumentType::PressRelease);
        let (spec, classifier) = specs[0];
        let extraction = extract_statement(SEGMENT_RESULTS, spec, classifier).unwrap();
        assert_eq!(extraction.current.get("ccg"), Some(7411.0));
        assert_eq!(extraction.current.get("intelFoundry"), Some(4320.0));
        assert_eq!(extraction.current.get("altera"), Some(361.0));
        assert!(!extraction.current.contains("dcg"));
        assert_eq!(extraction.comparative.unwrap().get("dcai"), Some(3114.0));

        let specs = profile.dispatch(period, Domain::SegmentProfit, DocumentType::PressRelease);
        let (spec, classifier) = specs[0];
        let extraction = extract_statement(SEGMENT_RESULTS, spec, classifier).unwrap();
        assert_eq!(extraction.current.get("intelFoundry"), Some(-2830.0));
        assert_eq!(extraction.current.get("ccg"), None);
    }

    #[test]
    fn test_four_segment_eras() {
        let profile = profile().unwrap();
        let names: Vec<&str> = [(2019, Quarter::Q3), (2022, Quarter::Q1), (2023, Quarter::Q4), (2025, Quarter::Q1)]
            .into_iter()
            .filter_map(|(year, quarter)| profile.era_for(FiscalPeriod::new(year, quarter)))
            .map(|era| era.name)
            .collect();
        assert_eq!(names, vec!["ccg-dcg", "dcai-nex", "internal-foundry", "products-foundry"]);
    }
}
