//! Statement extraction engine.
//!
//! A [`StatementSpec`] describes one financial statement as data: where to find
//! it, how its rows map to metric keys, which column holds the period and how the
//! values are scaled. [`extract_statement`] runs a spec against a document.

use regex::{Regex, RegexBuilder};
use tracing::debug;

use earnings_core::{DocumentType, Domain, EarningsError, QuarterRecord, Result};
use earnings_html::{
    Classifier, ColumnPick, ExtractedRow, LabelMap, RowKind, Rule, all_tables, extract_rows,
    first_figure_row, find_tables, header_year_cells, header_years, parse_number,
};

/// Lines of PDF text scanned after a statement title.
const TEXT_WINDOW_LINES: usize = 120;

/// Decimal places kept after scaling or subtraction.
const ROUNDING: f64 = 1e6;

/// Rounds away floating point noise from scaling and subtraction.
#[must_use]
pub fn round_amount(value: f64) -> f64 {
    (value * ROUNDING).round() / ROUNDING
}

/// Period covered by the values of a statement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PeriodScope {
    /// The fiscal quarter of the filing.
    Quarter,
    /// Fiscal year to date (10-Q cash flow statements).
    YearToDate,
    /// The full fiscal year (10-K statements).
    Annual,
}

/// Period the comparative column belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ComparativeTarget {
    /// Same quarter one year earlier.
    YearAgo,
    /// Fourth quarter of the prior fiscal year (balance sheet comparatives).
    PriorYearEnd,
}

/// Comparative column read alongside the current one.
///
/// Newer filings restate prior periods (segment reorganizations); reading the
/// comparative column records the restated figures for the earlier period.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Comparative {
    /// Column holding the comparative values.
    pub pick: ColumnPick,
    /// Period those values belong to.
    pub target: ComparativeTarget,
}

/// Orientation of a statement table.
#[derive(Clone, Debug)]
pub enum Layout {
    /// One metric per row, periods in columns.
    Rows,
    /// One metric per column (segment matrices): column headers map to keys and
    /// the first row whose label matches `row` supplies the values.
    Transposed {
        /// Pattern for the row holding the values.
        row: Regex,
    },
}

/// Data describing how to extract one statement.
#[derive(Clone, Debug)]
pub struct StatementSpec {
    /// Domain the values belong to.
    pub domain: Domain,
    /// Title alternatives, tried in order.
    pub titles: Vec<String>,
    /// Row label rules, or column header rules for a transposed layout.
    pub labels: LabelMap,
    /// Table orientation.
    pub layout: Layout,
    /// Column holding the filing's period.
    pub column: ColumnPick,
    /// Optional comparative column.
    pub comparative: Option<Comparative>,
    /// Multiplier applied to every value not marked per-share.
    pub scale: f64,
    /// Period covered by the values.
    pub scope: PeriodScope,
    /// Document types the statement appears in.
    pub documents: Vec<DocumentType>,
    /// Classifier override; the era's classifier applies otherwise.
    pub classifier: Option<Classifier>,
}

impl StatementSpec {
    /// Creates a row-oriented statement spec reading the latest-year column of
    /// press releases and 10-Qs.
    ///
    /// # Errors
    ///
    /// Returns [`EarningsError::Pattern`] if a rule does not compile.
    pub fn rows(domain: Domain, titles: &[&str], rules: &[&[Rule]]) -> Result<Self> {
        Ok(Self {
            domain,
            titles: titles.iter().map(ToString::to_string).collect(),
            labels: LabelMap::compile(rules)?,
            layout: Layout::Rows,
            column: ColumnPick::LatestYear,
            comparative: None,
            scale: 1.0,
            scope: PeriodScope::Quarter,
            documents: vec![DocumentType::PressRelease, DocumentType::Form10Q],
            classifier: None,
        })
    }

    /// Creates a transposed statement spec: `columns` map column headers to keys
    /// and values come from the first row matching `row`.
    ///
    /// # Errors
    ///
    /// Returns [`EarningsError::Pattern`] if a pattern does not compile.
    pub fn transposed(
        domain: Domain,
        titles: &[&str],
        row: &str,
        columns: &[&[Rule]],
    ) -> Result<Self> {
        let row = RegexBuilder::new(row)
            .case_insensitive(true)
            .build()
            .map_err(|e| EarningsError::Pattern {
                pattern: row.to_string(),
                message: e.to_string(),
            })?;
        let mut spec = Self::rows(domain, titles, columns)?;
        spec.layout = Layout::Transposed { row };
        Ok(spec)
    }

    /// Sets the value column.
    #[must_use]
    pub const fn column(mut self, pick: ColumnPick) -> Self {
        self.column = pick;
        self
    }

    /// Reads a comparative column as well.
    #[must_use]
    pub const fn comparative(mut self, pick: ColumnPick, target: ComparativeTarget) -> Self {
        self.comparative = Some(Comparative { pick, target });
        self
    }

    /// Sets the value multiplier (`0.001` for statements in thousands).
    #[must_use]
    pub const fn scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Sets the period scope.
    #[must_use]
    pub const fn scope(mut self, scope: PeriodScope) -> Self {
        self.scope = scope;
        self
    }

    /// Restricts the statement to the given document types.
    #[must_use]
    pub fn documents(mut self, documents: &[DocumentType]) -> Self {
        self.documents = documents.to_vec();
        self
    }

    /// Replaces the title alternatives.
    #[must_use]
    pub fn titles(mut self, titles: &[&str]) -> Self {
        self.titles = titles.iter().map(ToString::to_string).collect();
        self
    }

    /// Overrides the era classifier.
    #[must_use]
    pub fn classifier(mut self, classifier: Classifier) -> Self {
        self.classifier = Some(classifier);
        self
    }

    /// The 10-K variant of this statement: full-year values.
    #[must_use]
    pub fn annual(&self) -> Self {
        self.clone()
            .scope(PeriodScope::Annual)
            .documents(&[DocumentType::Form10K])
    }

    /// Returns true if the statement applies to a document type.
    #[must_use]
    pub fn applies_to(&self, document_type: DocumentType) -> bool {
        self.documents.contains(&document_type)
    }

    /// A record with every key of the spec set to `null`.
    fn empty_record(&self) -> QuarterRecord {
        self.labels.keys().into_iter().map(|key| (key, None)).collect()
    }

    fn value(&self, raw: &str, unscaled: bool) -> Option<f64> {
        let value = parse_number(raw)?;
        Some(if unscaled || self.scale == 1.0 {
            value
        } else {
            round_amount(value * self.scale)
        })
    }
}

/// Values read from one statement table.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Extraction {
    /// Values for the filing's own period.
    pub current: QuarterRecord,
    /// Values from the comparative column, when the spec asks for one.
    pub comparative: Option<QuarterRecord>,
}

impl Extraction {
    fn has_values(&self) -> bool {
        self.current.has_values()
    }
}

fn read_rows(rows: &[ExtractedRow], spec: &StatementSpec) -> Option<Extraction> {
    let years = header_years(rows);
    if spec.column.needs_years() && years.is_empty() {
        debug!(domain = %spec.domain, "Header years not found");
        return None;
    }

    let header = header_year_cells(rows);

    let mut current = spec.empty_record();
    let mut comparative = spec.comparative.map(|_| spec.empty_record());
    let mut section: Option<&str> = None;

    for row in rows {
        if row.kind == RowKind::SectionHeader {
            section = Some(row.label.as_str());
            continue;
        }
        if !row.is_data() {
            continue;
        }
        let Some(rule) = spec.labels.find(&row.label, section) else {
            continue;
        };
        if let Some(i) = spec.column.resolve_in_row(&years, &header, row) {
            current.fill(&rule.key, spec.value(&row.values[i], rule.unscaled));
        }
        if let (Some(record), Some(comp)) = (comparative.as_mut(), spec.comparative)
            && let Some(i) = comp.pick.resolve_in_row(&years, &header, row)
        {
            record.fill(&rule.key, spec.value(&row.values[i], rule.unscaled));
        }
    }

    Some(Extraction {
        current,
        comparative,
    })
}

fn read_transposed(rows: &[ExtractedRow], spec: &StatementSpec, pattern: &Regex) -> Option<Extraction> {
    let header_end = first_figure_row(rows)?;

    // The header row is the one naming the most mapped columns.
    let header = rows[..header_end].iter().max_by_key(|row| {
        row.cells
            .iter()
            .filter(|cell| spec.labels.find(&cell.text, None).is_some())
            .count()
    })?;

    let mut current = spec.empty_record();
    let row = rows[header_end..]
        .iter()
        .find(|row| row.is_data() && pattern.is_match(&row.label))?;

    for (raw, column) in row.values.iter().zip(&row.columns) {
        let Some(cell) = header.cells.iter().find(|cell| cell.covers(*column)) else {
            continue;
        };
        if let Some(rule) = spec.labels.find(&cell.text, None) {
            current.fill(&rule.key, spec.value(raw, rule.unscaled));
        }
    }

    Some(Extraction {
        current,
        comparative: None,
    })
}

fn read_table(source: &str, spec: &StatementSpec, classifier: &Classifier) -> Option<Extraction> {
    let rows = extract_rows(source, classifier);
    match &spec.layout {
        Layout::Rows => read_rows(&rows, spec),
        Layout::Transposed { row } => read_transposed(&rows, spec, row),
    }
}

/// Text windows following each occurrence of a title in extracted PDF text.
fn text_windows<'a>(text: &'a str, title: &str) -> Vec<&'a str> {
    let Ok(pattern) = RegexBuilder::new(&regex::escape(title.trim()))
        .case_insensitive(true)
        .build()
    else {
        return Vec::new();
    };
    if title.trim().is_empty() {
        return Vec::new();
    }
    pattern
        .find_iter(text)
        .map(|found| {
            let rest = &text[found.start()..];
            let end = rest
                .match_indices('\n')
                .nth(TEXT_WINDOW_LINES)
                .map_or(rest.len(), |(i, _)| i);
            &rest[..end]
        })
        .collect()
}

/// Candidate table sources for a spec, in priority order.
fn candidates<'a>(document: &'a str, spec: &StatementSpec, classifier: &Classifier) -> Vec<&'a str> {
    let mut found: Vec<&str> = Vec::new();
    for title in &spec.titles {
        let tables = if *classifier == Classifier::PlainText {
            text_windows(document, title)
        } else {
            find_tables(document, title)
        };
        for table in tables {
            if !found.contains(&table) {
                found.push(table);
            }
        }
    }
    if spec.titles.is_empty() {
        if *classifier == Classifier::PlainText {
            found.push(document);
        } else {
            found.extend(all_tables(document));
        }
    } else if found.is_empty() && *classifier == Classifier::PlainText {
        // PDF text often letter-spaces its headings; fall back to the whole text.
        found.push(document);
    }
    found
}

/// Runs a statement spec against a document.
///
/// Every candidate table (one per title occurrence) is tried in order and the
/// first one yielding at least one value wins. Returns `None` when no table
/// yields a value.
#[must_use]
pub fn extract_statement(
    document: &str,
    spec: &StatementSpec,
    classifier: &Classifier,
) -> Option<Extraction> {
    for (index, source) in candidates(document, spec, classifier).into_iter().enumerate() {
        match read_table(source, spec, classifier) {
            Some(extraction) if extraction.has_values() => {
                debug!(domain = %spec.domain, candidate = index, "Statement table matched");
                return Some(extraction);
            }
            _ => debug!(domain = %spec.domain, candidate = index, "Candidate table yielded no values"),
        }
    }
    None
}
