//! Core data types for filings and companies.
//!
//! This module defines the fundamental data structures:
//!
//! - [`Symbol`] - Trading symbol/ticker
//! - [`Company`] - A covered issuer
//! - [`DocumentType`] / [`DocumentFormat`] - What a filing document is
//! - [`Filing`] - One document on disk for one fiscal quarter
//! - [`Domain`] - The data domains extracted from filings

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EarningsError;
use crate::period::FiscalPeriod;

/// A trading symbol/ticker.
///
/// Symbols are automatically uppercased on creation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol(String);

impl Symbol {
    /// Creates a new symbol from a string, converting to uppercase.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into().to_uppercase())
    }

    /// Returns the symbol as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// A covered issuer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    /// Directory name under `companies/` and `docs/` (e.g. `"alphabet"`).
    pub name: String,
    /// Display name (e.g. `"Alphabet Inc."`).
    pub display_name: String,
    /// Primary ticker.
    pub symbol: Symbol,
    /// SEC CIK number, zero-padded to 10 digits.
    pub cik: String,
    /// Calendar month (1-12) in which the fiscal year ends.
    pub fiscal_year_end_month: u32,
}

impl Company {
    /// Creates a company with a December fiscal year end.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        display_name: impl Into<String>,
        symbol: impl Into<Symbol>,
        cik: &str,
    ) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            symbol: symbol.into(),
            cik: format!("{:0>10}", cik),
            fiscal_year_end_month: 12,
        }
    }

    /// Sets the month in which the fiscal year ends.
    #[must_use]
    pub const fn with_fiscal_year_end(mut self, month: u32) -> Self {
        self.fiscal_year_end_month = month;
        self
    }
}

/// The kind of document a filing is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DocumentType {
    /// Earnings press release (8-K exhibit 99.1 or a hosted release).
    PressRelease,
    /// Quarterly report.
    Form10Q,
    /// Annual report.
    Form10K,
}

impl DocumentType {
    /// Infers the document type from a file stem such as `press-release` or `10-Q`.
    #[must_use]
    pub fn from_stem(stem: &str) -> Option<Self> {
        let stem = stem.to_lowercase();
        if stem.contains("press") || stem.contains("ex99") || stem.contains("ex-99") {
            Some(Self::PressRelease)
        } else if stem.contains("10-q") || stem.contains("10q") {
            Some(Self::Form10Q)
        } else if stem.contains("10-k") || stem.contains("10k") {
            Some(Self::Form10K)
        } else {
            None
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PressRelease => write!(f, "press release"),
            Self::Form10Q => write!(f, "10-Q"),
            Self::Form10K => write!(f, "10-K"),
        }
    }
}

/// Storage format of a filing document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentFormat {
    /// HTML markup.
    Html,
    /// PDF, text is extracted before parsing.
    Pdf,
    /// Plain text previously extracted from a PDF.
    Text,
}

impl DocumentFormat {
    /// Infers the format from a file extension.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "htm" | "html" => Some(Self::Html),
            "pdf" => Some(Self::Pdf),
            "txt" => Some(Self::Text),
            _ => None,
        }
    }
}

/// One filing document for one fiscal quarter.
///
/// Filings are immutable once downloaded; the extraction pipeline only reads them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filing {
    /// Company directory name.
    pub company: String,
    /// Fiscal period the filing reports on.
    pub period: FiscalPeriod,
    /// Document type.
    pub document_type: DocumentType,
    /// Storage format.
    pub format: DocumentFormat,
    /// Location on disk.
    pub path: PathBuf,
}

impl Filing {
    /// Builds a filing from a path, inferring type and format from the file name.
    ///
    /// Returns `None` for files that are not recognizable filing documents.
    #[must_use]
    pub fn from_path(company: &str, period: FiscalPeriod, path: &Path) -> Option<Self> {
        let stem = path.file_stem()?.to_str()?;
        let ext = path.extension()?.to_str()?;
        Some(Self {
            company: company.to_string(),
            period,
            document_type: DocumentType::from_stem(stem)?,
            format: DocumentFormat::from_extension(ext)?,
            path: path.to_path_buf(),
        })
    }
}

/// A data domain extracted from filings, each persisted as one JSON document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Domain {
    /// Income statement.
    Financials,
    /// Balance sheet.
    BalanceSheet,
    /// Cash flow statement.
    CashFlow,
    /// Revenue by segment.
    Segments,
    /// Operating income by segment.
    SegmentProfit,
    /// Investment gains, interest income and other non-operating items.
    Investments,
    /// Quarter-end stock price, produced outside the extraction pipeline.
    StockPrice,
}

impl Domain {
    /// Domains produced by extraction, in output order.
    pub const EXTRACTED: [Self; 6] = [
        Self::Financials,
        Self::BalanceSheet,
        Self::CashFlow,
        Self::Segments,
        Self::SegmentProfit,
        Self::Investments,
    ];

    /// JSON file name under the company's `data/` directory.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Financials => "financials.json",
            Self::BalanceSheet => "balance-sheet.json",
            Self::CashFlow => "cash-flows.json",
            Self::Segments => "segments.json",
            Self::SegmentProfit => "segment-profit.json",
            Self::Investments => "investments.json",
            Self::StockPrice => "stock-prices.json",
        }
    }

    /// Short name used on the command line and in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Financials => "financials",
            Self::BalanceSheet => "balance-sheet",
            Self::CashFlow => "cash-flows",
            Self::Segments => "segments",
            Self::SegmentProfit => "segment-profit",
            Self::Investments => "investments",
            Self::StockPrice => "stock-prices",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Domain {
    type Err = EarningsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "financials" | "income" => Ok(Self::Financials),
            "balance-sheet" | "balance" => Ok(Self::BalanceSheet),
            "cash-flows" | "cash-flow" | "cashflow" => Ok(Self::CashFlow),
            "segments" => Ok(Self::Segments),
            "segment-profit" => Ok(Self::SegmentProfit),
            "investments" => Ok(Self::Investments),
            "stock-prices" | "stock-price" => Ok(Self::StockPrice),
            other => Err(EarningsError::Config(format!("unknown domain `{other}`"))),
        }
    }
}
