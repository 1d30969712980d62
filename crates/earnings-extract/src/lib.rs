#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/earnings/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Company profiles.
pub mod companies;
/// Filing discovery on disk.
pub mod discovery;
/// Filing document loading.
pub mod document;
/// Era Dispatcher.
pub mod era;
/// Extraction pipeline.
pub mod pipeline;
/// Quarter Reconciler.
pub mod reconcile;
/// Statement extraction engine.
pub mod statement;

pub use discovery::{discover_filings, filings_dir, sort_newest_first};
pub use document::Document;
pub use era::{CompanyProfile, Era};
pub use pipeline::{Accumulators, ExtractionSummary, Extractor, extract_documents};
pub use reconcile::{compute_q4, merge_missing, quarterize_year_to_date, reconcile};
pub use statement::{
    Comparative, ComparativeTarget, Extraction, Layout, PeriodScope, StatementSpec,
    extract_statement, round_amount,
};
