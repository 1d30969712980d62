//! Per-company site configuration.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use earnings_core::{DatasetStore, EarningsError, Result};

/// Default number of fiscal years with a quarter page.
pub const DEFAULT_PAGE_YEARS: u32 = 3;

/// Default number of fiscal years shown in a page's charts.
pub const DEFAULT_CHART_YEARS: u32 = 5;

/// Settings read from `companies/<name>/config.json`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteConfig {
    /// Trailing fiscal years that get a quarter page.
    pub page_years: u32,
    /// Trailing fiscal years of chart history on each page.
    pub chart_years: u32,
    /// Date of the next earnings release, if announced.
    pub next_earnings_date: Option<NaiveDate>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            page_years: DEFAULT_PAGE_YEARS,
            chart_years: DEFAULT_CHART_YEARS,
            next_earnings_date: None,
        }
    }
}

impl SiteConfig {
    /// Parses a configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`EarningsError::Json`] for malformed JSON and
    /// [`EarningsError::Config`] for a zero window.
    pub fn parse(text: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| EarningsError::json("config.json", e))?;
        if config.page_years == 0 || config.chart_years == 0 {
            return Err(EarningsError::Config(
                "pageYears and chartYears must be at least 1".to_string(),
            ));
        }
        Ok(config)
    }

    /// Loads a company's configuration. A missing or invalid file yields the
    /// defaults.
    #[must_use]
    pub fn load(store: &dyn DatasetStore, company: &str) -> Self {
        match store.read_config(company) {
            Ok(Some(text)) => Self::parse(&text).unwrap_or_else(|e| {
                warn!(company, error = %e, "Invalid configuration, using defaults");
                Self::default()
            }),
            Ok(None) => {
                debug!(company, "No configuration, using defaults");
                Self::default()
            }
            Err(e) => {
                warn!(company, error = %e, "Configuration unreadable, using defaults");
                Self::default()
            }
        }
    }

    /// Page window in quarters.
    #[must_use]
    pub const fn page_quarters(&self) -> i64 {
        self.page_years as i64 * 4
    }

    /// Chart window in quarters.
    #[must_use]
    pub const fn chart_quarters(&self) -> i64 {
        self.chart_years as i64 * 4
    }
}
