#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/earnings/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// JSON files on disk.
pub mod fs;
/// In-memory store.
pub mod memory;

pub use earnings_core::DatasetStore;

pub use fs::{FsStore, write_json};
pub use memory::MemoryStore;
