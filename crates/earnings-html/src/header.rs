//! Column header inspection.
//!
//! Statement tables put their period headers in the rows above the first data row,
//! sometimes with the date and the year on separate lines. [`header_years`] recovers
//! the year of each value column so the caller can pick the current period.

use std::sync::LazyLock;

use regex::Regex;

use crate::row::{CellText, ExtractedRow};

static YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").expect("static pattern is valid"));

/// Which value column of a row holds the period being extracted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnPick {
    /// A fixed column position.
    Index(usize),
    /// The last value of the row.
    Last,
    /// The first column headed by the most recent year.
    LatestYear,
    /// The first column headed by the year before the most recent one.
    PriorYear,
}

impl ColumnPick {
    /// Resolves the pick to a value index.
    ///
    /// `years` are the header years in column order, `width` the number of values
    /// in the row. Year-based picks without a usable header resolve to `None`.
    #[must_use]
    pub fn resolve(self, years: &[i32], width: usize) -> Option<usize> {
        let index = match self {
            Self::Index(i) => i,
            Self::Last => width.checked_sub(1)?,
            Self::LatestYear => {
                let latest = years.iter().max()?;
                years.iter().position(|y| y == latest)?
            }
            Self::PriorYear => {
                let prior = years.iter().max()? - 1;
                years.iter().position(|y| *y == prior)?
            }
        };
        (index < width).then_some(index)
    }

    /// Resolves the pick to a value index of `row` using grid columns.
    ///
    /// When every value of the row sits under one of the `header` cells, each
    /// value takes the year of the cell above it, so a blank cell does not shift
    /// later values into its place. Otherwise falls back to [`Self::resolve`].
    #[must_use]
    pub fn resolve_in_row(self, years: &[i32], header: &[(i32, &CellText)], row: &ExtractedRow) -> Option<usize> {
        if self.needs_years() && !header.is_empty() {
            let slots: Option<Vec<usize>> = row
                .columns
                .iter()
                .map(|column| header.iter().position(|(_, cell)| cell.covers(*column)))
                .collect();
            if let Some(slots) = slots {
                let header_years: Vec<i32> = header.iter().map(|(year, _)| *year).collect();
                let target = self.resolve(&header_years, header_years.len())?;
                return slots.iter().position(|slot| *slot == target);
            }
        }
        self.resolve(years, row.values.len())
    }

    /// Returns true if the pick needs header years.
    #[must_use]
    pub const fn needs_years(self) -> bool {
        matches!(self, Self::LatestYear | Self::PriorYear)
    }
}

/// Years found in a row's cells, in column order.
fn row_years(row: &ExtractedRow) -> Vec<i32> {
    row.cells
        .iter()
        .flat_map(|cell| YEAR.find_iter(&cell.text))
        .filter_map(|m| m.as_str().parse().ok())
        .collect()
}

/// Returns true for a row carrying real figures rather than a header.
fn is_figure_row(row: &ExtractedRow) -> bool {
    row.is_data() && !row.label.is_empty()
}

/// The header row and its years: among the rows before the first data row, the
/// one with the most year tokens. Ties keep the earlier row.
fn header_row(rows: &[ExtractedRow]) -> Option<(&ExtractedRow, Vec<i32>)> {
    let mut best: Option<(&ExtractedRow, Vec<i32>)> = None;
    for row in rows.iter().take_while(|row| !is_figure_row(row)) {
        let years = row_years(row);
        if !years.is_empty() && best.as_ref().is_none_or(|(_, seen)| years.len() > seen.len()) {
            best = Some((row, years));
        }
    }
    best
}

/// Header years of a statement table.
///
/// Among the rows before the first data row, the one with the most year tokens
/// wins; ties keep the earlier row. Returns an empty vector if no header row
/// carries a year.
#[must_use]
pub fn header_years(rows: &[ExtractedRow]) -> Vec<i32> {
    header_row(rows).map(|(_, years)| years).unwrap_or_default()
}

/// Year-bearing cells of the header row, with the year each one heads.
///
/// Empty when there is no header row or when any cell carries more than one
/// year, as in a plain text header line.
#[must_use]
pub fn header_year_cells(rows: &[ExtractedRow]) -> Vec<(i32, &CellText)> {
    let Some((row, _)) = header_row(rows) else {
        return Vec::new();
    };
    let mut cells = Vec::new();
    for cell in &row.cells {
        let mut years = YEAR.find_iter(&cell.text).filter_map(|m| m.as_str().parse::<i32>().ok());
        match (years.next(), years.next()) {
            (Some(year), None) => cells.push((year, cell)),
            (None, _) => {}
            (Some(_), Some(_)) => return Vec::new(),
        }
    }
    cells
}

/// Index of the first figure row, where the header ends.
#[must_use]
pub fn first_figure_row(rows: &[ExtractedRow]) -> Option<usize> {
    rows.iter().position(is_figure_row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::{Classifier, extract_rows};

    #[test]
    fn test_years_on_separate_line() {
        let html = r#"<table>
            <tr><td></td><td>As of</td><td>December 31, 2023</td><td>June 30,</td></tr>
            <tr><td></td><td></td><td>2023</td><td>2024</td></tr>
            <tr><td></td><td></td><td></td><td>(unaudited)</td></tr>
            <tr><td>Cash and cash equivalents</td><td></td><td>24,048</td><td>23,466</td></tr>
            <tr><td>Fiscal 2019 restructuring</td><td></td><td>1</td><td>2</td></tr>
        </table>"#;
        let rows = extract_rows(html, &Classifier::ColumnMatrix);
        assert_eq!(header_years(&rows), vec![2023, 2024]);
        assert_eq!(first_figure_row(&rows), Some(3));
    }

    #[test]
    fn test_most_years_wins() {
        let html = r#"<table>
            <tr><td>Three Months Ended June 30, 2024</td><td>Six Months Ended</td></tr>
            <tr><td></td><td>2023</td><td>2024</td><td>2023</td><td>2024</td></tr>
            <tr><td>Revenues</td><td>74,604</td><td>84,742</td><td>144,391</td><td>165,281</td></tr>
        </table>"#;
        let rows = extract_rows(html, &Classifier::ColumnMatrix);
        let years = header_years(&rows);
        assert_eq!(years, vec![2023, 2024, 2023, 2024]);
        assert_eq!(ColumnPick::LatestYear.resolve(&years, 4), Some(1));
        assert_eq!(ColumnPick::PriorYear.resolve(&years, 4), Some(0));
    }

    #[test]
    fn test_text_header() {
        let text = "Q2-2023 Q3-2023 Q4-2023 Q1-2024 Q2-2024\nTotal revenues 24,927 23,350 25,167 21,301 25,500";
        let rows = extract_rows(text, &Classifier::PlainText);
        assert_eq!(header_years(&rows), vec![2023, 2023, 2023, 2024, 2024]);
        assert!(header_year_cells(&rows).is_empty());
        let total = rows.iter().find(|row| row.label == "Total revenues").unwrap();
        assert_eq!(ColumnPick::Last.resolve_in_row(&[], &[], total), Some(4));
    }

    #[test]
    fn test_blank_cell_keeps_its_column() {
        let html = r#"<table>
            <tr><td></td><td>2023</td><td>2024</td><td>2023</td><td>2024</td></tr>
            <tr><td>Other income</td><td></td><td>102</td><td>55</td><td>174</td></tr>
        </table>"#;
        let rows = extract_rows(html, &Classifier::ColumnMatrix);
        let years = header_years(&rows);
        let header = header_year_cells(&rows);
        assert_eq!(header.iter().map(|(year, _)| *year).collect::<Vec<_>>(), years);

        let row = &rows[1];
        assert_eq!(row.values, ["102", "55", "174"]);
        assert_eq!(ColumnPick::LatestYear.resolve_in_row(&years, &header, row), Some(0));
        assert_eq!(ColumnPick::PriorYear.resolve_in_row(&years, &header, row), None);
        // Positional resolution would land on the six-month column.
        assert_eq!(ColumnPick::LatestYear.resolve(&years, row.values.len()), Some(1));
    }

    #[test]
    fn test_resolve_bounds() {
        assert_eq!(ColumnPick::Index(1).resolve(&[], 2), Some(1));
        assert_eq!(ColumnPick::Index(2).resolve(&[], 2), None);
        assert_eq!(ColumnPick::Last.resolve(&[], 3), Some(2));
        assert_eq!(ColumnPick::Last.resolve(&[], 0), None);
        assert_eq!(ColumnPick::LatestYear.resolve(&[], 2), None);
        assert_eq!(ColumnPick::PriorYear.resolve(&[2024], 1), None);
    }
}
