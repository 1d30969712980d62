//! Extraction pipeline.
//!
//! Filings are read newest first. Every statement found is merged into its
//! domain table with first-write-wins semantics, so restated comparative figures
//! from a newer filing take precedence over the originals of an older one. Once
//! all filings are read, the Quarter Reconciler fills the remaining gaps.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use earnings_core::{DatasetStore, Domain, DomainTable, FiscalPeriod, Quarter, Result};

use crate::discovery::discover_filings;
use crate::document::Document;
use crate::era::CompanyProfile;
use crate::reconcile::reconcile;
use crate::statement::{ComparativeTarget, Extraction, PeriodScope, StatementSpec, extract_statement};

/// Tables collected for one domain while filings are read.
#[derive(Clone, Debug, Default)]
pub struct DomainAccumulator {
    /// Quarterly values and annual totals as reported.
    direct: DomainTable,
    /// Fiscal-year-to-date values.
    ytd: DomainTable,
    /// Keys never derived by the reconciler.
    non_additive: BTreeSet<String>,
}

impl DomainAccumulator {
    fn record(&mut self, spec: &StatementSpec, period: FiscalPeriod, extraction: &Extraction) -> usize {
        self.non_additive
            .extend(spec.labels.non_additive_keys().into_iter().map(str::to_string));
        let mut written = 0;
        match spec.scope {
            PeriodScope::Quarter => {
                written += self.direct.fill(period, &extraction.current);
                if let (Some(comparative), Some(values)) = (spec.comparative, &extraction.comparative) {
                    let target = match comparative.target {
                        ComparativeTarget::YearAgo => period.year_ago(),
                        ComparativeTarget::PriorYearEnd => FiscalPeriod::new(period.year - 1, Quarter::Q4),
                    };
                    written += self.direct.fill(target, values);
                }
            }
            PeriodScope::YearToDate => {
                written += self.ytd.fill(period, &extraction.current);
                if let Some(values) = &extraction.comparative {
                    written += self.ytd.fill(period.year_ago(), values);
                }
            }
            PeriodScope::Annual => {
                written += self.direct.fill_annual(period.year, &extraction.current);
                self.ytd.fill_annual(period.year, &extraction.current);
                if let Some(values) = &extraction.comparative {
                    written += self.direct.fill_annual(period.year - 1, values);
                    self.ytd.fill_annual(period.year - 1, values);
                }
            }
        }
        written
    }

    /// Reconciles and returns the finished table.
    #[must_use]
    pub fn finish(mut self) -> DomainTable {
        let derived = reconcile(&mut self.direct, &self.ytd, &self.non_additive);
        if derived > 0 {
            debug!(derived, "Reconciled quarters");
        }
        self.direct.prune_empty();
        self.direct
    }
}

/// Domain tables being built for one company.
#[derive(Clone, Debug, Default)]
pub struct Accumulators(BTreeMap<Domain, DomainAccumulator>);

impl Accumulators {
    /// Creates accumulators for the given domains.
    #[must_use]
    pub fn new(domains: &[Domain]) -> Self {
        Self(domains.iter().map(|domain| (*domain, DomainAccumulator::default())).collect())
    }

    /// Runs every applicable statement spec against one document.
    ///
    /// Returns the number of values written.
    #[instrument(skip_all, fields(company = %profile.name(), period = %document.filing.period, document = %document.filing.document_type))]
    pub fn extract_document(&mut self, profile: &CompanyProfile, document: &Document) -> usize {
        let filing = &document.filing;
        if profile.era_for(filing.period).is_none() {
            warn!("No era covers this period");
            return 0;
        }

        let mut written = 0;
        for (domain, accumulator) in &mut self.0 {
            let specs = profile.dispatch(filing.period, *domain, filing.document_type);
            if specs.is_empty() {
                debug!(%domain, "No statement for this document type");
                continue;
            }
            for (spec, markup) in specs {
                let classifier = document.classifier(markup);
                match extract_statement(&document.text, spec, classifier) {
                    Some(extraction) => {
                        let count = accumulator.record(spec, filing.period, &extraction);
                        debug!(%domain, scope = ?spec.scope, count, "Statement extracted");
                        written += count;
                    }
                    None => warn!(%domain, scope = ?spec.scope, "No statement table yielded values"),
                }
            }
        }
        written
    }

    /// Reconciles every domain and returns the finished tables.
    #[must_use]
    pub fn finish(self) -> BTreeMap<Domain, DomainTable> {
        self.0
            .into_iter()
            .map(|(domain, accumulator)| (domain, accumulator.finish()))
            .collect()
    }
}

/// Extracts domain tables from documents already in memory.
///
/// Documents must be in processing order (newest period first).
#[must_use]
pub fn extract_documents(
    profile: &CompanyProfile,
    documents: &[Document],
    domains: &[Domain],
) -> BTreeMap<Domain, DomainTable> {
    let mut accumulators = Accumulators::new(domains);
    for document in documents {
        accumulators.extract_document(profile, document);
    }
    accumulators.finish()
}

/// Outcome of extracting one company.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExtractionSummary {
    /// Company directory name.
    pub company: String,
    /// Filings found on disk.
    pub filings: usize,
    /// Filings that could not be read.
    pub failed: usize,
    /// Periods written per domain.
    pub periods: BTreeMap<Domain, usize>,
}

/// Reads a company's filings from disk and stores the extracted tables.
#[derive(Clone, Debug)]
pub struct Extractor {
    root: PathBuf,
}

impl Extractor {
    /// Creates an extractor for a data root.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The data root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Extracts the requested domains for a company and saves them to `store`.
    ///
    /// An empty `domains` slice means every domain the profile extracts.
    /// Unreadable filings are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the filings directory cannot be listed or a table
    /// cannot be saved.
    #[instrument(skip(self, profile, store), fields(company = %profile.name()))]
    pub fn run(
        &self,
        profile: &CompanyProfile,
        store: &dyn DatasetStore,
        domains: &[Domain],
    ) -> Result<ExtractionSummary> {
        let domains = if domains.is_empty() {
            profile.domains()
        } else {
            domains.to_vec()
        };
        let filings = discover_filings(&self.root, profile.name())?;
        info!(filings = filings.len(), "Extracting filings");

        let mut summary = ExtractionSummary {
            company: profile.name().to_string(),
            filings: filings.len(),
            ..ExtractionSummary::default()
        };
        let mut accumulators = Accumulators::new(&domains);
        for filing in &filings {
            match Document::load(filing) {
                Ok(document) => {
                    accumulators.extract_document(profile, &document);
                }
                Err(e) => {
                    warn!(path = %filing.path.display(), error = %e, "Skipping unreadable filing");
                    summary.failed += 1;
                }
            }
        }

        for (domain, table) in accumulators.finish() {
            store.save_table(profile.name(), domain, &table)?;
            info!(%domain, periods = table.len(), "Saved domain table");
            summary.periods.insert(domain, table.len());
        }
        Ok(summary)
    }
}
