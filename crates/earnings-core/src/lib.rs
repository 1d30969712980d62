#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/earnings/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core traits and types for quarterly earnings extraction.
//!
//! This crate provides the foundational abstractions shared by the extraction
//! engine and the site generator:
//!
//! - [`FiscalPeriod`](period::FiscalPeriod) - Fiscal year and quarter pair
//! - [`Filing`](types::Filing) - One on-disk filing document
//! - [`QuarterRecord`](record::QuarterRecord) - Metric key to value map for one quarter
//! - [`DomainTable`](record::DomainTable) - All quarters of one data domain
//! - [`DatasetStore`](store::DatasetStore) - Persistence abstraction

/// Error types for extraction and generation.
pub mod error;
/// Fiscal period definitions.
pub mod period;
/// Metric records and domain tables.
pub mod record;
/// Persistence trait for domain tables and company configuration.
pub mod store;
/// Core data types (Symbol, Company, Filing, etc.).
pub mod types;

// Re-export commonly used items at crate root
pub use error::{EarningsError, Result};
pub use period::{FiscalPeriod, Quarter};
pub use record::{DomainTable, QuarterRecord};
pub use store::DatasetStore;
pub use types::{Company, DocumentFormat, DocumentType, Domain, Filing, Symbol};
