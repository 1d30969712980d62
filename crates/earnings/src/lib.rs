#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/earnings/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Quarterly earnings extraction and static dashboard generation.
//!
//! This crate ties the workspace together. It re-exports the core types,
//! the extraction engine, the stores and the site generator, and provides a
//! [`CompanyRegistry`] that runs them over a data root.
//!
//! # Example
//!
//! ```rust,ignore
//! use earnings::{CompanyRegistry, Domain};
//!
//! let registry = CompanyRegistry::open("/srv/earnings")?;
//! registry.extract(&["alphabet".to_string()], &[Domain::BalanceSheet]);
//! registry.generate(&[]);
//! ```

/// Command line interface.
pub mod cli;
mod registry;

// Core types and traits
pub use earnings_core::*;

pub use earnings_extract::{CompanyProfile, Era, ExtractionSummary, Extractor, companies};
pub use earnings_html::{Classifier, Rule, parse_number};
pub use earnings_site::{CompanyDataset, SiteConfig, SiteGenerator, SiteSummary};
pub use earnings_store::{FsStore, MemoryStore};

pub use registry::{CompanyOutcome, CompanyRegistry};
