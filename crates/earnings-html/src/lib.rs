#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/earnings/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Column header inspection.
pub mod header;
/// Locale-formatted number parsing.
pub mod number;
/// Row classification.
pub mod row;
/// Label rules.
pub mod rules;
/// Table location by title.
pub mod table;

pub use header::{ColumnPick, first_figure_row, header_year_cells, header_years};
pub use number::{as_year, is_dash, is_numeric_token, parse_number};
pub use row::{Align, CellText, Classifier, ExtractedRow, RowKind, clean_label, extract_rows};
pub use rules::{LabelMap, LabelRule, Rule};
pub use table::{all_tables, find_table, find_tables};
