//! Company registry running extraction and site generation over a data root.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use earnings_core::{Domain, EarningsError, Result};
use earnings_extract::{CompanyProfile, ExtractionSummary, Extractor, companies};
use earnings_site::{SiteGenerator, SiteSummary};
use earnings_store::FsStore;

/// Outcome of one company in a batch run.
#[derive(Debug)]
pub struct CompanyOutcome<T> {
    /// Company directory name.
    pub company: String,
    /// The company's result.
    pub result: Result<T>,
}

/// Registry of company profiles bound to a data root.
///
/// Batch operations run company by company. A failing company is logged and
/// reported in its [`CompanyOutcome`]; the remaining companies still run.
///
/// # Example
///
/// ```rust,ignore
/// use earnings::CompanyRegistry;
///
/// let registry = CompanyRegistry::open(".")?;
/// for outcome in registry.extract(&[], &[]) {
///     println!("{}: {}", outcome.company, outcome.result.is_ok());
/// }
/// ```
pub struct CompanyRegistry {
    root: PathBuf,
    profiles: Vec<CompanyProfile>,
    store: FsStore,
    generator: SiteGenerator,
}

impl std::fmt::Debug for CompanyRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompanyRegistry")
            .field("root", &self.root)
            .field(
                "profiles",
                &self.profiles.iter().map(CompanyProfile::name).collect::<Vec<_>>(),
            )
            .field("docs", &self.generator.docs())
            .finish()
    }
}

impl CompanyRegistry {
    /// Opens a data root with every built-in company profile.
    ///
    /// # Errors
    ///
    /// Returns [`EarningsError::Io`] if the root is not a readable directory,
    /// or a profile construction error.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let metadata = fs::metadata(&root).map_err(|e| EarningsError::io(&root, e))?;
        if !metadata.is_dir() {
            return Err(EarningsError::io(
                &root,
                std::io::Error::new(std::io::ErrorKind::NotADirectory, "data root is not a directory"),
            ));
        }
        let profiles = companies::all()?;
        debug!(root = %root.display(), profiles = profiles.len(), "Opened data root");
        Ok(Self {
            store: FsStore::new(&root),
            generator: SiteGenerator::new(&root),
            profiles,
            root,
        })
    }

    /// Replaces the site generator, e.g. to pin the generation timestamp.
    #[must_use]
    pub fn with_generator(mut self, generator: SiteGenerator) -> Self {
        self.generator = generator;
        self
    }

    /// Adds a profile, replacing a built-in one with the same name.
    #[must_use]
    pub fn with_profile(mut self, profile: CompanyProfile) -> Self {
        debug!(company = profile.name(), "Registering profile");
        self.profiles.retain(|existing| existing.name() != profile.name());
        self.profiles.push(profile);
        self
    }

    /// The data root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The store backing this registry.
    pub const fn store(&self) -> &FsStore {
        &self.store
    }

    /// Registered profiles.
    pub fn profiles(&self) -> &[CompanyProfile] {
        &self.profiles
    }

    /// Looks up one profile.
    ///
    /// # Errors
    ///
    /// Returns [`EarningsError::UnknownCompany`] if no profile has that name.
    pub fn get(&self, name: &str) -> Result<&CompanyProfile> {
        self.profiles
            .iter()
            .find(|profile| profile.name() == name)
            .ok_or_else(|| EarningsError::UnknownCompany(name.to_string()))
    }

    /// Resolves company names to profiles. An empty list selects every profile;
    /// unknown names are logged and skipped.
    pub fn select(&self, names: &[String]) -> Vec<&CompanyProfile> {
        if names.is_empty() {
            return self.profiles.iter().collect();
        }
        names
            .iter()
            .filter_map(|name| {
                self.get(name)
                    .inspect_err(|e| warn!(company = %name, error = %e, "Skipping company"))
                    .ok()
            })
            .collect()
    }

    fn for_each<T>(
        &self,
        names: &[String],
        stage: &str,
        mut run: impl FnMut(&CompanyProfile) -> Result<T>,
    ) -> Vec<CompanyOutcome<T>> {
        self.select(names)
            .into_iter()
            .map(|profile| {
                let result = run(profile);
                if let Err(e) = &result {
                    warn!(company = profile.name(), stage, error = %e, "Company failed");
                }
                CompanyOutcome {
                    company: profile.name().to_string(),
                    result,
                }
            })
            .collect()
    }

    /// Extracts domain tables for the named companies (all when empty).
    ///
    /// An empty `domains` slice extracts every domain of each profile.
    pub fn extract(
        &self,
        names: &[String],
        domains: &[Domain],
    ) -> Vec<CompanyOutcome<ExtractionSummary>> {
        let extractor = Extractor::new(&self.root);
        let outcomes = self.for_each(names, "extract", |profile| {
            extractor.run(profile, &self.store, domains)
        });
        info!(
            companies = outcomes.len(),
            failed = outcomes.iter().filter(|o| o.result.is_err()).count(),
            "Extraction finished"
        );
        outcomes
    }

    /// Generates the site for the named companies (all when empty).
    pub fn generate(&self, names: &[String]) -> Vec<CompanyOutcome<SiteSummary>> {
        let outcomes = self.for_each(names, "generate", |profile| {
            self.generator.generate(&profile.company, &self.store)
        });
        info!(
            companies = outcomes.len(),
            failed = outcomes.iter().filter(|o| o.result.is_err()).count(),
            "Generation finished"
        );
        outcomes
    }
}
