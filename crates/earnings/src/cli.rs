//! Command line interface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use earnings_core::{Domain, EarningsError, Result};

use crate::registry::{CompanyOutcome, CompanyRegistry};

/// Quarterly earnings extraction and dashboard generation.
#[derive(Debug, Parser)]
#[command(name = "earnings", version, about)]
pub struct Cli {
    /// Data root containing `companies/` and `docs/`.
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Log level or filter directive (overrides RUST_LOG).
    #[arg(long, global = true, value_name = "LEVEL")]
    pub trace: Option<String>,

    /// Command to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Company selection shared by the commands.
#[derive(Debug, Clone, Default, Args)]
pub struct CompanyArgs {
    /// Company to process; repeat for several. Defaults to all.
    #[arg(long = "company", value_name = "NAME")]
    pub companies: Vec<String>,
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract domain tables from filings.
    Extract {
        /// Companies to extract.
        #[command(flatten)]
        companies: CompanyArgs,
        /// Domain to extract; repeat for several. Defaults to all.
        #[arg(long = "domain", value_name = "DOMAIN", value_parser = parse_domain)]
        domains: Vec<Domain>,
    },
    /// Generate the static site from extracted tables.
    Generate {
        /// Companies to generate.
        #[command(flatten)]
        companies: CompanyArgs,
    },
    /// Extract every domain, then generate the site.
    Run {
        /// Companies to process.
        #[command(flatten)]
        companies: CompanyArgs,
    },
    /// List the known companies.
    Companies,
}

fn parse_domain(value: &str) -> Result<Domain> {
    let domain: Domain = value.parse()?;
    if Domain::EXTRACTED.contains(&domain) {
        Ok(domain)
    } else {
        Err(EarningsError::Config(format!("`{domain}` is not extracted from filings")))
    }
}

impl Cli {
    /// Installs the global tracing subscriber. `--trace` wins over `RUST_LOG`;
    /// the default level is `info`.
    pub fn init_tracing(&self) {
        let filter = self
            .trace
            .as_deref()
            .and_then(|directive| EnvFilter::try_new(directive).ok())
            .or_else(|| EnvFilter::try_from_default_env().ok())
            .unwrap_or_else(|| EnvFilter::new("info"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }

    /// Runs the selected command.
    ///
    /// # Errors
    ///
    /// Returns an error only when the data root is unusable. Failures of
    /// individual companies are logged and do not fail the run.
    pub fn run(self) -> Result<()> {
        if let Command::Companies = self.command {
            for profile in earnings_extract::companies::all()? {
                let company = &profile.company;
                println!("{:<10} {:<6} {}", company.name, company.symbol.as_str(), company.display_name);
            }
            return Ok(());
        }

        let registry = CompanyRegistry::open(&self.root)?;
        match self.command {
            Command::Extract { companies, domains } => {
                report("extract", &registry.extract(&companies.companies, &domains));
            }
            Command::Generate { companies } => {
                report("generate", &registry.generate(&companies.companies));
            }
            Command::Run { companies } => {
                report("extract", &registry.extract(&companies.companies, &[]));
                report("generate", &registry.generate(&companies.companies));
            }
            Command::Companies => {}
        }
        Ok(())
    }
}

fn report<T>(stage: &str, outcomes: &[CompanyOutcome<T>]) {
    let failed: Vec<&str> = outcomes
        .iter()
        .filter(|outcome| outcome.result.is_err())
        .map(|outcome| outcome.company.as_str())
        .collect();
    if failed.is_empty() {
        info!(stage, companies = outcomes.len(), "Done");
    } else {
        info!(stage, companies = outcomes.len(), ?failed, "Done with failures");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_extract() {
        let cli = Cli::try_parse_from([
            "earnings",
            "extract",
            "--company",
            "alphabet",
            "--company",
            "tesla",
            "--domain",
            "balance-sheet",
            "--root",
            "/data",
        ])
        .unwrap();
        assert_eq!(cli.root, PathBuf::from("/data"));
        match cli.command {
            Command::Extract { companies, domains } => {
                assert_eq!(companies.companies, ["alphabet", "tesla"]);
                assert_eq!(domains, [Domain::BalanceSheet]);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["earnings", "--trace", "debug", "run"]).unwrap();
        assert_eq!(cli.root, PathBuf::from("."));
        assert_eq!(cli.trace.as_deref(), Some("debug"));
        assert!(matches!(cli.command, Command::Run { companies } if companies.companies.is_empty()));
    }

    #[test]
    fn test_rejects_stock_prices_domain() {
        assert!(Cli::try_parse_from(["earnings", "extract", "--domain", "stock-prices"]).is_err());
        assert!(Cli::try_parse_from(["earnings", "extract", "--domain", "bogus"]).is_err());
    }

    #[test]
    fn test_unusable_root_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        let cli =
            Cli::try_parse_from(["earnings", "generate", "--root", missing.to_str().unwrap()])
                .unwrap();
        assert!(cli.run().is_err());
    }
}
