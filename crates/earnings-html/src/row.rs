//! Row Classifier.
//!
//! Splits a located table into [`ExtractedRow`]s: a label, the row kind, and the
//! numeric cell tokens in column order. Which cells count as labels and values
//! depends on the filer's markup conventions, captured by [`Classifier`].

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::number::{is_numeric_token, is_value_punctuation};

static ROW_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("tr").expect("static selector is valid"));

static FOOTNOTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s*(?:\(\s*\d{1,2}\s*\)|\*+|\(\s*[a-z]\s*\))\s*$").expect("static pattern is valid")
});

/// Default colspan at which a cell is taken as the row label under
/// [`Classifier::InlineStyle`].
pub const DEFAULT_LABEL_COLSPAN: usize = 2;

/// Horizontal alignment read from markup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    /// Left aligned.
    Left,
    /// Right aligned.
    Right,
    /// Centered.
    Center,
}

impl Align {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().trim_matches(['"', '\'']).to_ascii_lowercase().as_str() {
            "left" | "start" | "justify" => Some(Self::Left),
            "right" | "end" => Some(Self::Right),
            "center" | "middle" => Some(Self::Center),
            _ => None,
        }
    }

    /// Reads `text-align` from an inline style declaration.
    fn from_style(style: &str) -> Option<Self> {
        style
            .split(';')
            .filter_map(|decl| decl.split_once(':'))
            .find(|(name, _)| name.trim().eq_ignore_ascii_case("text-align"))
            .and_then(|(_, value)| Self::parse(value))
    }
}

/// Markup convention used to tell labels from values.
///
/// Each filer (and each era of a filer) writes its tables differently; the
/// Era Dispatcher picks one of these per statement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Classifier {
    /// Modern inline styles: values carry `style="text-align:right"`, labels are
    /// left aligned or span at least `label_colspan` columns.
    InlineStyle {
        /// Colspan from which a cell is considered a label.
        label_colspan: usize,
    },
    /// Legacy `ALIGN="right"` / `ALIGN="left"` attributes.
    LegacyAlign,
    /// CSS classes, as written by GlobeNewswire releases.
    CssClass {
        /// Substring of the label cell class.
        label: String,
        /// Substring of the value cell class.
        value: String,
    },
    /// No alignment hints: every numeric cell is a value and keeps its grid
    /// column so values can be mapped to column headers.
    ColumnMatrix,
    /// Line-oriented text extracted from a PDF: leading words are the label,
    /// trailing numeric tokens the values.
    PlainText,
}

impl Classifier {
    /// Inline style classifier with the default label colspan.
    #[must_use]
    pub const fn inline() -> Self {
        Self::InlineStyle {
            label_colspan: DEFAULT_LABEL_COLSPAN,
        }
    }

    /// GlobeNewswire class names (`gnw_label_*`, `gnw_num_*`).
    #[must_use]
    pub fn globe_newswire() -> Self {
        Self::CssClass {
            label: "gnw_label".to_string(),
            value: "gnw_num".to_string(),
        }
    }

    fn flags_value(&self, cell: &RawCell) -> bool {
        match self {
            Self::InlineStyle { .. } => cell.style_align == Some(Align::Right),
            Self::LegacyAlign => cell.attr_align == Some(Align::Right),
            Self::CssClass { value, .. } => cell.class.contains(value.as_str()),
            Self::ColumnMatrix | Self::PlainText => false,
        }
    }

    fn flags_label(&self, cell: &RawCell) -> bool {
        match self {
            Self::InlineStyle { label_colspan } => {
                cell.style_align == Some(Align::Left) || cell.colspan >= *label_colspan
            }
            Self::LegacyAlign => cell.attr_align == Some(Align::Left),
            Self::CssClass { label, .. } => cell.class.contains(label.as_str()),
            Self::ColumnMatrix | Self::PlainText => false,
        }
    }
}

/// Role of a row inside a statement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowKind {
    /// Label with values.
    Data,
    /// Label without values, opening a section (`Revenues:`).
    SectionHeader,
    /// A `Total ...` line.
    Subtotal,
    /// Nothing usable (spacer rows, rules, header rows without text).
    Empty,
}

/// Text of one non-empty cell with its grid position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellText {
    /// Normalized cell text.
    pub text: String,
    /// First grid column covered by the cell.
    pub column: usize,
    /// Number of grid columns covered.
    pub span: usize,
}

impl CellText {
    /// Returns true if the cell covers grid column `column`.
    #[must_use]
    pub const fn covers(&self, column: usize) -> bool {
        column >= self.column && column < self.column + self.span
    }
}

/// One classified table row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtractedRow {
    /// Row label with whitespace normalized and footnote markers removed.
    pub label: String,
    /// Row role.
    pub kind: RowKind,
    /// Raw numeric tokens, in column order.
    pub values: Vec<String>,
    /// Grid column of each value.
    pub columns: Vec<usize>,
    /// Every non-empty cell, for header inspection.
    pub cells: Vec<CellText>,
}

impl ExtractedRow {
    /// Returns true if the row carries a label and at least one value.
    #[must_use]
    pub fn is_data(&self) -> bool {
        matches!(self.kind, RowKind::Data | RowKind::Subtotal) && !self.values.is_empty()
    }
}

#[derive(Clone, Debug)]
struct RawCell {
    text: String,
    style_align: Option<Align>,
    attr_align: Option<Align>,
    class: String,
    colspan: usize,
    column: usize,
}

/// Collapses whitespace (including non-breaking spaces) to single spaces.
#[must_use]
pub fn normalize_text(text: &str) -> String {
    text.split(|c: char| c.is_whitespace() || c == '\u{a0}' || c == '\u{200b}')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalizes a label for rule matching: whitespace, typographic quotes,
/// trailing footnote markers.
#[must_use]
pub fn clean_label(text: &str) -> String {
    let text = normalize_text(text).replace(['\u{2019}', '\u{2018}'], "'");
    FOOTNOTE.replace(&text, "").trim().to_string()
}

fn is_label_text(text: &str) -> bool {
    !text.is_empty()
        && !is_numeric_token(text)
        && !is_value_punctuation(text)
        && text.chars().any(char::is_alphabetic)
}

fn element_align(el: &ElementRef<'_>, attr: bool) -> Option<Align> {
    let own = if attr {
        el.value().attr("align").and_then(Align::parse)
    } else {
        el.value().attr("style").and_then(Align::from_style)
    };
    own.or_else(|| {
        el.descendants()
            .filter_map(ElementRef::wrap)
            .find_map(|child| {
                if attr {
                    child.value().attr("align").and_then(Align::parse)
                } else {
                    child.value().attr("style").and_then(Align::from_style)
                }
            })
    })
}

fn raw_cells(row: ElementRef<'_>) -> Vec<RawCell> {
    let mut column = 0;
    let mut cells = Vec::new();
    for cell in row.children().filter_map(ElementRef::wrap) {
        let name = cell.value().name();
        if name != "td" && name != "th" {
            continue;
        }
        let colspan = cell
            .value()
            .attr("colspan")
            .and_then(|c| c.trim().parse::<usize>().ok())
            .unwrap_or(1)
            .max(1);
        cells.push(RawCell {
            text: normalize_text(&cell.text().collect::<String>()),
            style_align: element_align(&cell, false),
            attr_align: element_align(&cell, true),
            class: cell.value().attr("class").unwrap_or_default().to_string(),
            colspan,
            column,
        });
        column += colspan;
    }
    cells
}

/// Drops bare currency cells and attaches `)` / `%` cells to the preceding value.
fn merge_punctuation(cells: &mut [RawCell]) {
    let mut last_value: Option<usize> = None;
    for i in 0..cells.len() {
        let text = cells[i].text.clone();
        if text.is_empty() {
            continue;
        }
        if is_value_punctuation(&text) {
            if (text.starts_with(')') || text.starts_with('%'))
                && let Some(prev) = last_value
            {
                cells[prev].text.push_str(&text);
            }
            cells[i].text.clear();
            continue;
        }
        last_value = is_numeric_token(&text).then_some(i);
    }
}

fn classify(mut cells: Vec<RawCell>, classifier: &Classifier) -> ExtractedRow {
    merge_punctuation(&mut cells);

    let any_flagged = cells
        .iter()
        .any(|c| classifier.flags_value(c) && is_numeric_token(&c.text));
    let is_value: Vec<bool> = cells
        .iter()
        .map(|c| is_numeric_token(&c.text) && (!any_flagged || classifier.flags_value(c)))
        .collect();

    let label_index = cells
        .iter()
        .enumerate()
        .position(|(i, c)| !is_value[i] && classifier.flags_label(c) && is_label_text(&c.text))
        .or_else(|| {
            cells
                .iter()
                .enumerate()
                .position(|(i, c)| !is_value[i] && is_label_text(&c.text))
        });

    let label = label_index
        .map(|i| clean_label(&cells[i].text))
        .unwrap_or_default();

    let mut values = Vec::new();
    let mut columns = Vec::new();
    for (cell, _) in cells.iter().zip(&is_value).filter(|(_, v)| **v) {
        values.push(cell.text.clone());
        columns.push(cell.column);
    }

    let texts = cells
        .iter()
        .filter(|c| !c.text.is_empty())
        .map(|c| CellText {
            text: c.text.clone(),
            column: c.column,
            span: c.colspan,
        })
        .collect();

    ExtractedRow {
        kind: row_kind(&label, &values),
        label,
        values,
        columns,
        cells: texts,
    }
}

fn row_kind(label: &str, values: &[String]) -> RowKind {
    if label.to_ascii_lowercase().starts_with("total") && !values.is_empty() {
        RowKind::Subtotal
    } else if !values.is_empty() {
        RowKind::Data
    } else if !label.is_empty() {
        RowKind::SectionHeader
    } else {
        RowKind::Empty
    }
}

/// Classifies one line of PDF text.
fn text_row(line: &str) -> ExtractedRow {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let split = tokens
        .iter()
        .rposition(|t| !(is_numeric_token(t) || is_value_punctuation(t)))
        .map_or(0, |i| i + 1);

    let label = clean_label(&tokens[..split].join(" "));
    let mut values: Vec<String> = Vec::new();
    for token in &tokens[split..] {
        let token = token.trim();
        if token == "$" || token == "€" || token == "£" {
            continue;
        }
        if is_value_punctuation(token) {
            if let Some(last) = values.last_mut() {
                last.push_str(token);
            }
            continue;
        }
        values.push(token.to_string());
    }
    let columns: Vec<usize> = (1..=values.len()).collect();

    let mut cells = Vec::new();
    if !label.is_empty() {
        cells.push(CellText {
            text: label.clone(),
            column: 0,
            span: 1,
        });
    }
    cells.extend(values.iter().zip(&columns).map(|(v, c)| CellText {
        text: v.clone(),
        column: *c,
        span: 1,
    }));

    ExtractedRow {
        kind: row_kind(&label, &values),
        label,
        values,
        columns,
        cells,
    }
}

/// Classifies every row of a located table (or, for [`Classifier::PlainText`],
/// every line of a text block).
///
/// Rows with nothing in them are dropped.
#[must_use]
pub fn extract_rows(source: &str, classifier: &Classifier) -> Vec<ExtractedRow> {
    let rows: Vec<ExtractedRow> = if *classifier == Classifier::PlainText {
        source.lines().map(text_row).collect()
    } else {
        let fragment = Html::parse_fragment(source);
        fragment
            .select(&ROW_SELECTOR)
            .map(|row| classify(raw_cells(row), classifier))
            .collect()
    };
    rows.into_iter()
        .filter(|row| row.kind != RowKind::Empty || !row.cells.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODERN: &str = r#"<table>
        <tr><td colspan="3"></td><td colspan="3" style="text-align:center">Three Months Ended June 30,</td></tr>
        <tr><td></td><td style="text-align:center">2023</td><td></td><td style="text-align:center">2024</td></tr>
        <tr><td style="text-align:left">Revenues:</td><td></td><td></td><td></td></tr>
        <tr><td style="text-align:left">Google Services</td><td>$</td><td style="text-align:right">66,285</td><td>$</td><td style="text-align:right">73,928</td></tr>
        <tr><td style="text-align:left">Other Bets (1)</td><td style="text-align:right">(1,234</td><td>)</td><td style="text-align:right">&#8212;</td></tr>
        <tr><td style="padding-left:10px">Total revenues</td><td style="text-align:right">74,604</td><td style="text-align:right">84,742</td></tr>
    </table>"#;

    #[test]
    fn test_inline_style_rows() {
        let rows = extract_rows(MODERN, &Classifier::inline());
        let header = rows.iter().find(|r| r.label == "Revenues:").unwrap();
        assert_eq!(header.kind, RowKind::SectionHeader);

        let services = rows.iter().find(|r| r.label == "Google Services").unwrap();
        assert_eq!(services.kind, RowKind::Data);
        assert_eq!(services.values, vec!["66,285", "73,928"]);

        let bets = rows.iter().find(|r| r.label == "Other Bets").unwrap();
        assert_eq!(bets.values, vec!["(1,234)", "\u{2014}"]);

        let total = rows.iter().find(|r| r.label == "Total revenues").unwrap();
        assert_eq!(total.kind, RowKind::Subtotal);
        assert!(total.is_data());
    }

    #[test]
    fn test_inline_style_prefers_flagged_cells() {
        let html = r#"<table><tr><td style="text-align:left">Net income</td>
            <td>(2)</td><td style="text-align:right">23,619</td></tr></table>"#;
        let rows = extract_rows(html, &Classifier::inline());
        assert_eq!(rows[0].values, vec!["23,619"]);
    }

    #[test]
    fn test_legacy_align_rows() {
        let html = r#"<TABLE><TR><TD ALIGN="left"><FONT>Cash and cash equivalents</FONT></TD>
            <TD ALIGN="right">$</TD><TD ALIGN="right">12,918</TD><TD><P ALIGN="right">16,701</P></TD></TR></TABLE>"#;
        let rows = extract_rows(html, &Classifier::LegacyAlign);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].label, "Cash and cash equivalents");
        assert_eq!(rows[0].values, vec!["12,918", "16,701"]);
    }

    #[test]
    fn test_css_class_rows() {
        let html = r#"<table>
            <tr><td class="gnw_label_left">Data Center</td><td class="gnw_num_right">$ 26,272</td><td class="gnw_num_right">10,323</td></tr>
            <tr><td class="gnw_label_left">Footnote 3</td><td class="gnw_text">3</td></tr>
        </table>"#;
        let rows = extract_rows(html, &Classifier::globe_newswire());
        assert_eq!(rows[0].label, "Data Center");
        assert_eq!(rows[0].values, vec!["$ 26,272", "10,323"]);
        assert_eq!(rows[1].values, vec!["3"]);
    }

    #[test]
    fn test_column_matrix_keeps_grid_columns() {
        let html = r#"<table>
            <tr><td></td><td colspan="2">Compute &amp; Networking</td><td colspan="2">Graphics</td></tr>
            <tr><td>Revenue</td><td>$</td><td>26,446</td><td>$</td><td>3,594</td></tr>
        </table>"#;
        let rows = extract_rows(html, &Classifier::ColumnMatrix);
        let header = &rows[0];
        assert_eq!(header.cells.len(), 2);
        assert_eq!(header.cells[0].text, "Compute & Networking");
        assert!(header.cells[0].covers(2));
        assert!(header.cells[1].covers(4));
        assert_eq!(rows[1].values, vec!["26,446", "3,594"]);
        assert_eq!(rows[1].columns, vec![2, 4]);
    }

    #[test]
    fn test_plain_text_lines() {
        let text = "Income Statement\n Q2-2023 Q3-2023 Q4-2023 Q1-2024 Q2-2024\nTotal revenues 24,927 23,350 25,167 21,301 25,500\nOther income (expense), net 328 (37) 315 108 (18)\n\n";
        let rows = extract_rows(text, &Classifier::PlainText);
        assert_eq!(rows[0].kind, RowKind::SectionHeader);
        let total = rows.iter().find(|r| r.label == "Total revenues").unwrap();
        assert_eq!(total.values.len(), 5);
        assert_eq!(total.values[4], "25,500");
        let other = rows.iter().find(|r| r.label.starts_with("Other income")).unwrap();
        assert_eq!(other.label, "Other income (expense), net");
        assert_eq!(other.values, vec!["328", "(37)", "315", "108", "(18)"]);
    }

    #[test]
    fn test_clean_label() {
        assert_eq!(clean_label("Stockholders\u{2019} equity (1)"), "Stockholders' equity");
        assert_eq!(clean_label(" Net\u{a0}income* "), "Net income");
        assert_eq!(clean_label("Other Bets (a)"), "Other Bets");
    }

    #[test]
    fn test_align_from_style() {
        assert_eq!(
            Align::from_style("padding:0; TEXT-ALIGN: right ;"),
            Some(Align::Right)
        );
        assert_eq!(Align::from_style("font-weight:bold"), None);
    }
}
