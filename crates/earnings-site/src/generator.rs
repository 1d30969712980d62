//! Site generation.
//!
//! Output layout under `docs/<company>/`:
//!
//! ```text
//! data.json                    full dataset
//! index.html                   list of quarter pages
//! quarters/<slug>/data.json    one page's view
//! quarters/<slug>/index.html   one rendered page
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::{debug, info, instrument};

use earnings_core::{Company, DatasetStore, EarningsError, Result};
use earnings_store::write_json;

use crate::config::SiteConfig;
use crate::dataset::CompanyDataset;
use crate::page::pages;
use crate::render::{render_index, render_page};

/// Result of generating one company's pages.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SiteSummary {
    /// Company name.
    pub company: String,
    /// Quarters in the dataset.
    pub quarters: usize,
    /// Quarter pages written.
    pub pages: usize,
    /// Files whose content changed.
    pub files_written: usize,
}

/// Writes the static site for companies under a `docs/` directory.
#[derive(Clone, Debug)]
pub struct SiteGenerator {
    docs: PathBuf,
    generated_at: DateTime<Utc>,
    write_index: bool,
}

impl SiteGenerator {
    /// Creates a generator writing to `<root>/docs`, stamped with the current time.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            docs: root.as_ref().join("docs"),
            generated_at: Utc::now(),
            write_index: true,
        }
    }

    /// Overrides the generation timestamp.
    #[must_use]
    pub const fn with_generated_at(mut self, generated_at: DateTime<Utc>) -> Self {
        self.generated_at = generated_at;
        self
    }

    /// Whether to write the company index page.
    #[must_use]
    pub const fn with_index(mut self, write_index: bool) -> Self {
        self.write_index = write_index;
        self
    }

    /// The output directory.
    pub fn docs(&self) -> &Path {
        &self.docs
    }

    /// Directory of one company's pages.
    pub fn company_dir(&self, company: &str) -> PathBuf {
        self.docs.join(company)
    }

    fn write_html(path: &Path, html: &str) -> Result<bool> {
        if fs::read_to_string(path).is_ok_and(|existing| existing == html) {
            return Ok(false);
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| EarningsError::io(parent, e))?;
        }
        fs::write(path, html).map_err(|e| EarningsError::io(path, e))?;
        Ok(true)
    }

    /// Generates the dataset and pages of one company.
    ///
    /// Quarter pages are rebuilt from scratch so quarters that fell out of the
    /// page window do not linger.
    ///
    /// # Errors
    ///
    /// Returns an error when an output file cannot be written or serialized.
    #[instrument(skip(self, company, store), fields(company = %company.name))]
    pub fn generate(&self, company: &Company, store: &dyn DatasetStore) -> Result<SiteSummary> {
        let config = SiteConfig::load(store, &company.name);
        let generated_at = self.generated_at.to_rfc3339_opts(SecondsFormat::Secs, true);
        let dataset = CompanyDataset::load(company.clone(), store)
            .stamped(generated_at, config.next_earnings_date);

        let dir = self.company_dir(&company.name);
        let mut files_written = usize::from(write_json(&dir.join("data.json"), &dataset)?);

        let quarters_dir = dir.join("quarters");
        match fs::remove_dir_all(&quarters_dir) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(EarningsError::io(&quarters_dir, e)),
        }

        let pages = pages(&dataset, &config);
        for page in &pages {
            let page_dir = quarters_dir.join(&page.quarter.slug);
            let chart_json = serde_json::to_string(page.chart)
                .map_err(|e| EarningsError::json(page.quarter.slug.clone(), e))?;
            files_written += usize::from(write_json(&page_dir.join("data.json"), page)?);
            files_written +=
                usize::from(Self::write_html(&page_dir.join("index.html"), &render_page(page, &chart_json))?);
            debug!(quarter = %page.quarter.slug, "Wrote page");
        }

        if self.write_index {
            files_written +=
                usize::from(Self::write_html(&dir.join("index.html"), &render_index(&dataset, &pages))?);
        }

        let summary = SiteSummary {
            company: company.name.clone(),
            quarters: dataset.quarters.len(),
            pages: pages.len(),
            files_written,
        };
        info!(quarters = summary.quarters, pages = summary.pages, "Generated site");
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use earnings_core::{Domain, DomainTable, FiscalPeriod, Quarter, QuarterRecord};
    use earnings_store::MemoryStore;

    fn store() -> MemoryStore {
        let store = MemoryStore::new().with_config(
            "alphabet",
            r#"{"pageYears": 1, "chartYears": 2, "nextEarningsDate": "2024-10-29"}"#,
        );
        let mut income = DomainTable::new();
        for year in 2022..=2024 {
            for quarter in Quarter::ALL {
                let record: QuarterRecord =
                    [("revenue", Some(1000.0 + f64::from(year - 2022) * 100.0))].into_iter().collect();
                income.fill(FiscalPeriod::new(year, quarter), &record);
            }
        }
        store.save_table("alphabet", Domain::Financials, &income).unwrap();
        store
    }

    fn generator(root: &Path) -> SiteGenerator {
        SiteGenerator::new(root)
            .with_generated_at(Utc.with_ymd_and_hms(2024, 10, 1, 12, 0, 0).unwrap())
    }

    #[test]
    fn test_generate_layout() {
        let root = tempfile::tempdir().unwrap();
        let company = Company::new("alphabet", "Alphabet", "GOOGL", "1652044");
        let summary = generator(root.path()).generate(&company, &store()).unwrap();
        assert_eq!(summary.quarters, 12);
        assert_eq!(summary.pages, 4);

        let dir = root.path().join("docs/alphabet");
        let data: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(dir.join("data.json")).unwrap()).unwrap();
        assert_eq!(data["generatedAt"], "2024-10-01T12:00:00Z");
        assert_eq!(data["nextEarningsDate"], "2024-10-29");
        assert_eq!(data["quarters"].as_array().unwrap().len(), 12);

        let page: serde_json::Value = serde_json::from_str(
            &fs::read_to_string(dir.join("quarters/FY2024Q4/data.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(page["chart"].as_array().unwrap().len(), 8);
        assert_eq!(page["previous"]["href"], "../FY2024Q3/");
        assert!(page["next"].is_null());

        let html = fs::read_to_string(dir.join("quarters/FY2024Q4/index.html")).unwrap();
        assert!(html.contains("Alphabet (GOOGL) FY2024 Q4"));
        assert!(html.contains("id=\"chart-data\""));
        assert!(dir.join("index.html").exists());
        assert!(!dir.join("quarters/FY2023Q4").exists());
    }

    #[test]
    fn test_stale_pages_removed_and_rerun_is_stable() {
        let root = tempfile::tempdir().unwrap();
        let company = Company::new("alphabet", "Alphabet", "GOOGL", "1652044");
        let stale = root.path().join("docs/alphabet/quarters/FY2019Q1");
        fs::create_dir_all(&stale).unwrap();

        let generator = generator(root.path());
        generator.generate(&company, &store()).unwrap();
        assert!(!stale.exists());

        let first = fs::read_to_string(root.path().join("docs/alphabet/data.json")).unwrap();
        let rerun = generator.generate(&company, &store()).unwrap();
        assert_eq!(rerun.files_written, 8);
        let second = fs::read_to_string(root.path().join("docs/alphabet/data.json")).unwrap();
        assert_eq!(first, second);
    }
}
