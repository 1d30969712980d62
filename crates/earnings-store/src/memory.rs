//! In-memory store.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use tracing::debug;

use earnings_core::{DatasetStore, Domain, DomainTable, Result};

/// Key for table entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct TableKey {
    company: String,
    domain: Domain,
}

impl TableKey {
    fn new(company: &str, domain: Domain) -> Self {
        Self {
            company: company.to_string(),
            domain,
        }
    }
}

/// Simple in-memory store for testing.
///
/// Tables are stored in `RwLock`-protected `HashMap`s and are lost when the store
/// is dropped. Tables are cloned on load and save.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<HashMap<TableKey, DomainTable>>,
    configs: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the raw configuration document of a company.
    #[must_use]
    pub fn with_config(self, company: &str, config: impl Into<String>) -> Self {
        self.configs
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(company.to_string(), config.into());
        self
    }

    /// Number of stored tables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Returns true if no table was saved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DatasetStore for MemoryStore {
    fn load_table(&self, company: &str, domain: Domain) -> Result<DomainTable> {
        let tables = self.tables.read().unwrap_or_else(PoisonError::into_inner);
        match tables.get(&TableKey::new(company, domain)) {
            Some(table) => {
                debug!(company, %domain, "Table hit");
                Ok(table.clone())
            }
            None => {
                debug!(company, %domain, "Table miss");
                Ok(DomainTable::new())
            }
        }
    }

    fn save_table(&self, company: &str, domain: Domain, table: &DomainTable) -> Result<()> {
        let mut tables = self.tables.write().unwrap_or_else(PoisonError::into_inner);
        tables.insert(TableKey::new(company, domain), table.clone());
        debug!(company, %domain, periods = table.len(), "Stored table");
        Ok(())
    }

    fn read_config(&self, company: &str) -> Result<Option<String>> {
        let configs = self.configs.read().unwrap_or_else(PoisonError::into_inner);
        Ok(configs.get(company).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use earnings_core::{FiscalPeriod, Quarter, QuarterRecord};

    #[test]
    fn test_memory_store_tables() {
        let store = MemoryStore::new();
        assert!(store.load_table("apple", Domain::Financials).unwrap().is_empty());

        let mut table = DomainTable::new();
        let record: QuarterRecord = [("revenue", Some(85777.0))].into_iter().collect();
        table.fill(FiscalPeriod::new(2024, Quarter::Q3), &record);
        store.save_table("apple", Domain::Financials, &table).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.load_table("apple", Domain::Financials).unwrap(), table);
        assert!(store.load_table("apple", Domain::CashFlow).unwrap().is_empty());
    }

    #[test]
    fn test_memory_store_config() {
        let store = MemoryStore::new().with_config("apple", r#"{"pageYears": 2}"#);
        assert_eq!(store.read_config("apple").unwrap().as_deref(), Some(r#"{"pageYears": 2}"#));
        assert_eq!(store.read_config("amd").unwrap(), None);
    }
}
