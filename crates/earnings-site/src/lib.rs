#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/earnings/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod config;
pub mod dataset;
pub mod generator;
pub mod metrics;
pub mod page;
pub mod render;

pub use config::SiteConfig;
pub use dataset::{CompanyDataset, QuarterData};
pub use generator::{SiteGenerator, SiteSummary};
pub use page::{PageLink, QuarterPage, pages};
pub use render::{format_value, render_index, render_page};
