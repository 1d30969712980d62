//! Company profiles.
//!
//! One module per filer. Each exposes `profile()`, building the filer's eras
//! and statement specs from the shared rules in `common` plus its own segment
//! taxonomy.

mod common;

pub mod alphabet;
pub mod amazon;
pub mod amd;
pub mod apple;
pub mod intel;
pub mod meta;
pub mod microsoft;
pub mod netflix;
pub mod nvidia;
pub mod tesla;

use earnings_core::{EarningsError, Result};

use crate::era::CompanyProfile;

/// Directory names of every covered company.
pub const NAMES: [&str; 10] = [
    "alphabet",
    "amazon",
    "apple",
    "meta",
    "microsoft",
    "nvidia",
    "intel",
    "amd",
    "tesla",
    "netflix",
];

/// Builds the profile for a company directory name.
///
/// # Errors
///
/// Returns [`EarningsError::UnknownCompany`] for a name without a profile, or a
/// pattern error if the profile's rules do not compile.
pub fn by_name(name: &str) -> Result<CompanyProfile> {
    match name {
        "alphabet" => alphabet::profile(),
        "amazon" => amazon::profile(),
        "apple" => apple::profile(),
        "meta" => meta::profile(),
        "microsoft" => microsoft::profile(),
        "nvidia" => nvidia::profile(),
        "intel" => intel::profile(),
        "amd" => amd::profile(),
        "tesla" => tesla::profile(),
        "netflix" => netflix::profile(),
        other => Err(EarningsError::UnknownCompany(other.to_string())),
    }
}

/// Builds every company profile, in [`NAMES`] order.
///
/// # Errors
///
/// Returns the first profile construction error.
pub fn all() -> Result<Vec<CompanyProfile>> {
    NAMES.iter().map(|name| by_name(name)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_profile_builds() {
        let profiles = all().unwrap();
        assert_eq!(profiles.len(), NAMES.len());
        for (profile, name) in profiles.iter().zip(NAMES) {
            assert_eq!(profile.name(), name);
            assert!(!profile.eras.is_empty(), "{name}");
            assert!(!profile.domains().is_empty(), "{name}");
        }
    }

    #[test]
    fn test_eras_are_ordered() {
        for profile in all().unwrap() {
            for pair in profile.eras.windows(2) {
                assert!(pair[0].from < pair[1].from, "{}", profile.name());
                if let Some(until) = pair[0].until {
                    assert!(until < pair[1].from, "{}", profile.name());
                }
            }
        }
    }

    #[test]
    fn test_unknown_company() {
        assert!(matches!(by_name("ibm"), Err(EarningsError::UnknownCompany(name)) if name == "ibm"));
    }
}
