//! Filing discovery.
//!
//! Filings live under `<root>/companies/<name>/filings/FY<year>/Q<n>/`. The
//! document type comes from the file stem and the format from the extension;
//! anything else in those directories is ignored.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use earnings_core::{DocumentType, EarningsError, FiscalPeriod, Filing, Quarter, Result};

/// Directory holding a company's filings.
#[must_use]
pub fn filings_dir(root: &Path, company: &str) -> PathBuf {
    root.join("companies").join(company).join("filings")
}

/// Processing rank of a document type within one period.
///
/// The 10-K carries audited figures and is read before the 10-Q, which is read
/// before the press release.
const fn document_rank(document_type: DocumentType) -> u8 {
    match document_type {
        DocumentType::Form10K => 0,
        DocumentType::Form10Q => 1,
        DocumentType::PressRelease => 2,
    }
}

/// Sorts filings into processing order: newest period first, then by document
/// rank, then by path so the order is deterministic.
pub fn sort_newest_first(filings: &mut [Filing]) {
    filings.sort_by(|a, b| {
        b.period
            .cmp(&a.period)
            .then_with(|| document_rank(a.document_type).cmp(&document_rank(b.document_type)))
            .then_with(|| a.path.cmp(&b.path))
    });
}

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = fs::read_dir(dir)
        .map_err(|e| EarningsError::io(dir, e))?
        .map(|entry| entry.map(|e| e.path()).map_err(|e| EarningsError::io(dir, e)))
        .collect::<Result<Vec<_>>>()?;
    entries.sort();
    Ok(entries)
}

fn dir_name(path: &Path) -> Option<&str> {
    path.file_name().and_then(|name| name.to_str())
}

/// Lists every recognizable filing of a company, in processing order.
///
/// A missing filings directory yields no filings. Year and quarter directories
/// with unexpected names are skipped.
///
/// # Errors
///
/// Returns an error if an existing directory cannot be read.
pub fn discover_filings(root: &Path, company: &str) -> Result<Vec<Filing>> {
    let base = filings_dir(root, company);
    if !base.is_dir() {
        debug!(company, path = %base.display(), "No filings directory");
        return Ok(Vec::new());
    }

    let mut filings = Vec::new();
    for year_dir in sorted_entries(&base)?.into_iter().filter(|p| p.is_dir()) {
        let Some(year) = dir_name(&year_dir)
            .filter(|name| name.starts_with("FY"))
            .and_then(|name| FiscalPeriod::parse_year(name).ok())
        else {
            debug!(path = %year_dir.display(), "Skipping directory");
            continue;
        };
        for quarter_dir in sorted_entries(&year_dir)?.into_iter().filter(|p| p.is_dir()) {
            let Some(quarter) = dir_name(&quarter_dir).and_then(|name| name.parse::<Quarter>().ok())
            else {
                debug!(path = %quarter_dir.display(), "Skipping directory");
                continue;
            };
            let period = FiscalPeriod::new(year, quarter);
            for path in sorted_entries(&quarter_dir)?.into_iter().filter(|p| p.is_file()) {
                match Filing::from_path(company, period, &path) {
                    Some(filing) => filings.push(filing),
                    None => debug!(path = %path.display(), "Not a filing document"),
                }
            }
        }
    }

    sort_newest_first(&mut filings);
    Ok(filings)
}
