//! Persistence trait for domain tables and company configuration.
//!
//! This module defines the [`DatasetStore`] trait, the seam between extraction,
//! aggregation and whatever holds the per-company JSON documents.

use crate::{error::Result, record::DomainTable, types::Domain};

/// Storage for extracted domain tables and per-company configuration.
///
/// Writes replace the whole document. Loading a domain that was never written
/// returns an empty table rather than an error, so a missing segment file degrades
/// to `null` fields downstream.
pub trait DatasetStore: Send + Sync {
    /// Loads one domain table for a company.
    fn load_table(&self, company: &str, domain: Domain) -> Result<DomainTable>;

    /// Stores one domain table for a company, replacing any previous version.
    fn save_table(&self, company: &str, domain: Domain, table: &DomainTable) -> Result<()>;

    /// Returns the raw company configuration document, if one exists.
    fn read_config(&self, company: &str) -> Result<Option<String>>;
}
