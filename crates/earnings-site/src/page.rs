//! Quarter pages.
//!
//! Only quarters inside the trailing `pageYears` window get a page. Each page
//! carries the quarters of the trailing `chartYears` up to and including its
//! own, and links to its neighbours inside the window.

use chrono::NaiveDate;
use serde::Serialize;

use earnings_core::Company;

use crate::config::SiteConfig;
use crate::dataset::{CompanyDataset, QuarterData};

/// Link to another quarter page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageLink {
    /// Display label.
    pub label: String,
    /// Page directory name.
    pub slug: String,
    /// Relative URL from a sibling page.
    pub href: String,
}

impl PageLink {
    fn to(quarter: &QuarterData) -> Self {
        Self {
            label: quarter.label.clone(),
            slug: quarter.slug.clone(),
            href: format!("../{}/", quarter.slug),
        }
    }
}

/// The view of a dataset rendered for one quarter.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuarterPage<'a> {
    /// Company metadata.
    pub company: &'a Company,
    /// Generation timestamp.
    pub generated_at: &'a str,
    /// Date of the next earnings release.
    pub next_earnings_date: Option<NaiveDate>,
    /// The page's quarter.
    pub quarter: &'a QuarterData,
    /// Chart history, oldest first, ending with the page's quarter.
    pub chart: &'a [QuarterData],
    /// Previous page in the window.
    pub previous: Option<PageLink>,
    /// Next page in the window.
    pub next: Option<PageLink>,
}

/// Index of the first quarter in the trailing window of `quarters` quarters
/// ending at `end` (inclusive).
fn window_start(quarters: &[QuarterData], end: usize, length: i64) -> usize {
    let last = quarters[end].period.ordinal();
    quarters[..=end]
        .iter()
        .position(|quarter| quarter.period.ordinal() > last - length)
        .unwrap_or(end)
}

/// Builds the pages of a dataset, oldest first.
#[must_use]
pub fn pages<'a>(dataset: &'a CompanyDataset, config: &SiteConfig) -> Vec<QuarterPage<'a>> {
    let quarters = &dataset.quarters;
    let Some(last) = quarters.len().checked_sub(1) else {
        return Vec::new();
    };
    let first = window_start(quarters, last, config.page_quarters());

    (first..=last)
        .map(|i| {
            let chart_start = window_start(quarters, i, config.chart_quarters());
            QuarterPage {
                company: &dataset.company,
                generated_at: &dataset.generated_at,
                next_earnings_date: dataset.next_earnings_date,
                quarter: &quarters[i],
                chart: &quarters[chart_start..=i],
                previous: (i > first).then(|| PageLink::to(&quarters[i - 1])),
                next: (i < last).then(|| PageLink::to(&quarters[i + 1])),
            }
        })
        .collect()
}
