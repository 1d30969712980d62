//! Error types for extraction and generation.
//!
//! This module defines [`EarningsError`]. Missing tables and unparseable numbers are
//! not errors: they degrade to absent values. Errors cover the cases where a run
//! cannot continue for a company (I/O, invalid configuration, bad label patterns).

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while extracting filings or generating the site.
#[derive(Error, Debug)]
pub enum EarningsError {
    /// Reading or writing a file failed.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// The file or directory involved.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A JSON document could not be read or written.
    #[error("JSON error in {context}: {source}")]
    Json {
        /// What was being (de)serialized.
        context: String,
        /// The underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// A label or title pattern failed to compile.
    #[error("Invalid pattern `{pattern}`: {message}")]
    Pattern {
        /// The offending pattern.
        pattern: String,
        /// Compiler message.
        message: String,
    },

    /// Text could not be extracted from a PDF filing.
    #[error("PDF error in {}: {message}", path.display())]
    Pdf {
        /// The PDF file.
        path: PathBuf,
        /// Extractor message.
        message: String,
    },

    /// No profile is registered under this company name.
    #[error("Unknown company: {0}")]
    UnknownCompany(String),

    /// A fiscal period string or directory name could not be parsed.
    #[error("Invalid fiscal period: {0}")]
    InvalidPeriod(String),

    /// Company configuration is invalid.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl EarningsError {
    /// Wraps an I/O error with the path it occurred at.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Wraps a JSON error with a short description of what was being processed.
    pub fn json(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            context: context.into(),
            source,
        }
    }
}

/// Result type alias using [`EarningsError`].
pub type Result<T> = std::result::Result<T, EarningsError>;
