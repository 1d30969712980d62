//! Era Dispatcher.
//!
//! Filers change their table markup and segment taxonomy over time. A company
//! profile is a list of [`Era`]s, each covering a contiguous span of fiscal
//! periods with its own classifier and statement specs.

use earnings_core::{Company, DocumentType, Domain, FiscalPeriod, Quarter};
use earnings_html::Classifier;

use crate::statement::StatementSpec;

/// A span of fiscal periods sharing the same markup conventions.
#[derive(Clone, Debug)]
pub struct Era {
    /// Short name used in logs.
    pub name: &'static str,
    /// First period covered.
    pub from: FiscalPeriod,
    /// Last period covered; `None` for the current era.
    pub until: Option<FiscalPeriod>,
    /// Default row classifier.
    pub classifier: Classifier,
    /// Statements extracted in this era.
    pub statements: Vec<StatementSpec>,
}

impl Era {
    /// Creates an open-ended era starting at the first quarter of `year`.
    #[must_use]
    pub const fn starting(name: &'static str, year: i32, classifier: Classifier) -> Self {
        Self {
            name,
            from: FiscalPeriod::new(year, Quarter::Q1),
            until: None,
            classifier,
            statements: Vec::new(),
        }
    }

    /// Starts the era at a specific period.
    #[must_use]
    pub const fn since(mut self, period: FiscalPeriod) -> Self {
        self.from = period;
        self
    }

    /// Closes the era at `period` (inclusive).
    #[must_use]
    pub const fn until(mut self, period: FiscalPeriod) -> Self {
        self.until = Some(period);
        self
    }

    /// Adds statement specs.
    #[must_use]
    pub fn with(mut self, statements: impl IntoIterator<Item = StatementSpec>) -> Self {
        self.statements.extend(statements);
        self
    }

    /// Returns true if the era covers a period.
    #[must_use]
    pub fn covers(&self, period: FiscalPeriod) -> bool {
        period >= self.from && self.until.is_none_or(|until| period <= until)
    }

    /// Classifier for a statement: the statement's override or the era default.
    #[must_use]
    pub fn classifier_for<'a>(&'a self, spec: &'a StatementSpec) -> &'a Classifier {
        spec.classifier.as_ref().unwrap_or(&self.classifier)
    }
}

/// Extraction profile for one company.
#[derive(Clone, Debug)]
pub struct CompanyProfile {
    /// Company metadata.
    pub company: Company,
    /// Eras in chronological order.
    pub eras: Vec<Era>,
}

impl CompanyProfile {
    /// Creates a profile without eras.
    #[must_use]
    pub const fn new(company: Company) -> Self {
        Self {
            company,
            eras: Vec::new(),
        }
    }

    /// Adds an era.
    #[must_use]
    pub fn era(mut self, era: Era) -> Self {
        self.eras.push(era);
        self
    }

    /// Company directory name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.company.name
    }

    /// The era covering a period. When eras overlap the later one wins.
    #[must_use]
    pub fn era_for(&self, period: FiscalPeriod) -> Option<&Era> {
        self.eras.iter().rev().find(|era| era.covers(period))
    }

    /// Statement specs applicable to a filing, with the classifier to use.
    ///
    /// Empty when no era covers the period or the era has no statement for the
    /// domain in this document type.
    #[must_use]
    pub fn dispatch(
        &self,
        period: FiscalPeriod,
        domain: Domain,
        document_type: DocumentType,
    ) -> Vec<(&StatementSpec, &Classifier)> {
        let Some(era) = self.era_for(period) else {
            return Vec::new();
        };
        era.statements
            .iter()
            .filter(|spec| spec.domain == domain && spec.applies_to(document_type))
            .map(|spec| (spec, era.classifier_for(spec)))
            .collect()
    }

    /// Domains any era extracts.
    #[must_use]
    pub fn domains(&self) -> Vec<Domain> {
        Domain::EXTRACTED
            .into_iter()
            .filter(|domain| {
                self.eras
                    .iter()
                    .any(|era| era.statements.iter().any(|spec| spec.domain == *domain))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use earnings_html::Rule;

    const SEGMENTS: &[Rule] = &[Rule::new("^client computing group$", "ccg")];

    fn profile() -> CompanyProfile {
        let segments = StatementSpec::rows(Domain::Segments, &["Segment"], &[SEGMENTS]).unwrap();
        CompanyProfile::new(Company::new("intel", "Intel", "INTC", "50863"))
            .era(
                Era::starting("legacy", 2019, Classifier::LegacyAlign)
                    .until(FiscalPeriod::new(2021, Quarter::Q4))
                    .with([segments.clone()]),
            )
            .era(
                Era::starting("modern", 2022, Classifier::inline())
                    .with([segments.classifier(Classifier::ColumnMatrix)]),
            )
    }

    #[test]
    fn test_era_boundaries() {
        let profile = profile();
        assert!(profile.era_for(FiscalPeriod::new(2018, Quarter::Q4)).is_none());
        assert_eq!(profile.era_for(FiscalPeriod::new(2019, Quarter::Q1)).unwrap().name, "legacy");
        assert_eq!(profile.era_for(FiscalPeriod::new(2021, Quarter::Q4)).unwrap().name, "legacy");
        assert_eq!(profile.era_for(FiscalPeriod::new(2022, Quarter::Q1)).unwrap().name, "modern");
        assert_eq!(profile.era_for(FiscalPeriod::new(2030, Quarter::Q3)).unwrap().name, "modern");
    }

    #[test]
    fn test_dispatch_filters_domain_and_document() {
        let profile = profile();
        let legacy = profile.dispatch(
            FiscalPeriod::new(2020, Quarter::Q2),
            Domain::Segments,
            DocumentType::PressRelease,
        );
        assert_eq!(legacy.len(), 1);
        assert_eq!(*legacy[0].1, Classifier::LegacyAlign);

        let modern = profile.dispatch(
            FiscalPeriod::new(2024, Quarter::Q2),
            Domain::Segments,
            DocumentType::Form10Q,
        );
        assert_eq!(*modern[0].1, Classifier::ColumnMatrix);

        assert!(profile
            .dispatch(FiscalPeriod::new(2024, Quarter::Q2), Domain::Segments, DocumentType::Form10K)
            .is_empty());
        assert!(profile
            .dispatch(FiscalPeriod::new(2024, Quarter::Q2), Domain::Financials, DocumentType::PressRelease)
            .is_empty());
        assert!(profile
            .dispatch(FiscalPeriod::new(2010, Quarter::Q1), Domain::Segments, DocumentType::PressRelease)
            .is_empty());
        assert_eq!(profile.domains(), vec![Domain::Segments]);
    }
}
