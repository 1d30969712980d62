//! Locale-formatted financial number parsing.
//!
//! Filing tables write negative values in parentheses, use dashes for "no data",
//! and split currency symbols and closing parentheses into separate cells. The
//! helpers here turn a single cell token into a signed value.

use html_escape::decode_html_entities;

/// Characters that stand for "no value" in a table cell.
const DASHES: [char; 6] = ['-', '—', '–', '‒', '―', '−'];

/// Typographic minus sign, read as `-`.
const MINUS: char = '\u{2212}';

/// Characters trimmed from both ends before parsing.
const TRIM: [char; 6] = ['$', '€', '£', '\u{a0}', '*', ' '];

/// Parses a financial table token into a signed number.
///
/// Rules, in order: decode HTML entities; trim whitespace, non-breaking spaces
/// and currency symbols; a dash means no data; parentheses negate (an unclosed
/// leading parenthesis counts, since the closing one is often in the next cell);
/// thousands separators and a trailing percent sign are dropped. Anything that
/// is still not a number yields `None`.
#[must_use]
pub fn parse_number(raw: &str) -> Option<f64> {
    let decoded = decode_html_entities(raw).replace(MINUS, "-");
    let mut text = decoded
        .trim()
        .trim_matches(|c: char| TRIM.contains(&c) || c.is_whitespace())
        .trim_end_matches('%')
        .trim_end();

    if text.is_empty() || is_dash(text) {
        return None;
    }

    let mut negative = false;
    if let Some(inner) = text.strip_prefix('(') {
        negative = true;
        text = inner.strip_suffix(')').unwrap_or(inner);
    } else if let Some(inner) = text.strip_suffix(')') {
        // `1,234)` when the opening parenthesis sat in the previous cell
        negative = true;
        text = inner;
    }

    let cleaned: String = text
        .trim_matches(|c: char| TRIM.contains(&c) || c.is_whitespace())
        .chars()
        .filter(|c| *c != ',')
        .collect();

    if cleaned.is_empty() || is_dash(&cleaned) {
        return None;
    }
    if !cleaned
        .chars()
        .all(|c| c.is_ascii_digit() || c == '.' || c == '-')
    {
        return None;
    }

    let value = cleaned.parse::<f64>().ok()?;
    Some(if negative { -value.abs() } else { value })
}

/// Returns true if the token is a dash placeholder.
#[must_use]
pub fn is_dash(text: &str) -> bool {
    let text = text.trim();
    !text.is_empty() && text.chars().all(|c| DASHES.contains(&c))
}

/// Returns true if the token looks like a table value: a number, a parenthesized
/// number, or a dash placeholder.
#[must_use]
pub fn is_numeric_token(raw: &str) -> bool {
    let decoded = decode_html_entities(raw).replace(MINUS, "-");
    let text = decoded.trim().trim_matches(|c: char| TRIM.contains(&c) || c.is_whitespace());
    if text.is_empty() {
        return false;
    }
    if is_dash(text) {
        return true;
    }
    let body = text.trim_start_matches('(').trim_end_matches(')').trim_end_matches('%');
    !body.is_empty()
        && body.chars().any(|c| c.is_ascii_digit())
        && body
            .chars()
            .all(|c| c.is_ascii_digit() || c == ',' || c == '.' || c == '-' || c == ' ')
}

/// Returns true if the token is only punctuation that belongs to a neighbouring
/// value cell (`$`, `)`, `%`).
#[must_use]
pub fn is_value_punctuation(raw: &str) -> bool {
    let decoded = decode_html_entities(raw);
    let text = decoded.trim().trim_matches('\u{a0}');
    matches!(text, "$" | ")" | "%" | ")%" | "%)" | "€" | "£")
}

/// Returns true if the token is a plausible four-digit fiscal or calendar year.
#[must_use]
pub fn as_year(raw: &str) -> Option<i32> {
    let text = raw.trim();
    if text.len() != 4 || !text.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let year = text.parse::<i32>().ok()?;
    (1990..=2100).contains(&year).then_some(year)
}
