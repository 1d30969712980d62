//! JSON file store.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, instrument};

use earnings_core::{DatasetStore, Domain, DomainTable, EarningsError, Result};

/// Writes a value as pretty-printed JSON with a trailing newline, creating
/// parent directories as needed.
///
/// The file is left untouched when its content would not change. Returns true
/// if the file was written.
///
/// # Errors
///
/// Returns an error if serialization or any filesystem operation fails.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<bool> {
    let mut json = serde_json::to_string_pretty(value)
        .map_err(|e| EarningsError::json(path.display().to_string(), e))?;
    json.push('\n');

    if fs::read_to_string(path).is_ok_and(|existing| existing == json) {
        debug!(path = %path.display(), "Unchanged");
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| EarningsError::io(parent, e))?;
    }
    fs::write(path, json).map_err(|e| EarningsError::io(path, e))?;
    debug!(path = %path.display(), "Written");
    Ok(true)
}

/// Reads a file, mapping a missing file to `None`.
fn read_optional(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(EarningsError::io(path, e)),
    }
}

/// Domain tables stored as JSON files under `<root>/companies/<name>/data/`.
#[derive(Clone, Debug)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    /// Creates a store rooted at a data directory.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The data root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory of a company.
    #[must_use]
    pub fn company_dir(&self, company: &str) -> PathBuf {
        self.root.join("companies").join(company)
    }

    /// Path of a domain document.
    #[must_use]
    pub fn table_path(&self, company: &str, domain: Domain) -> PathBuf {
        self.company_dir(company).join("data").join(domain.file_name())
    }

    /// Path of the company configuration file.
    #[must_use]
    pub fn config_path(&self, company: &str) -> PathBuf {
        self.company_dir(company).join("config.json")
    }
}

impl DatasetStore for FsStore {
    #[instrument(skip(self))]
    fn load_table(&self, company: &str, domain: Domain) -> Result<DomainTable> {
        let path = self.table_path(company, domain);
        let Some(text) = read_optional(&path)? else {
            debug!(path = %path.display(), "No table on disk");
            return Ok(DomainTable::new());
        };
        serde_json::from_str(&text).map_err(|e| EarningsError::json(path.display().to_string(), e))
    }

    #[instrument(skip(self, table), fields(periods = table.len()))]
    fn save_table(&self, company: &str, domain: Domain, table: &DomainTable) -> Result<()> {
        write_json(&self.table_path(company, domain), table)?;
        Ok(())
    }

    fn read_config(&self, company: &str) -> Result<Option<String>> {
        read_optional(&self.config_path(company))
    }
}
