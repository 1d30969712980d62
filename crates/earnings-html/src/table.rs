//! Table Locator.
//!
//! Finds the `<table>` element that belongs to a statement title such as
//! `CONSOLIDATED BALANCE SHEETS`. The title either sits inside the table (in a
//! caption row) or immediately before it; nested tables are balanced by depth.

use regex::{Regex, RegexBuilder};
use tracing::debug;

const OPEN_TAG: &str = "<table";
const CLOSE_TAG: &str = "</table";

/// Separator allowed between title words: whitespace, non-breaking space
/// entities and inline tags.
const WORD_GAP: &str = r"(?:\s|&nbsp;|&#160;|&#xa0;|\x{a0}|<[^>]*>)+";

/// Builds the case-insensitive pattern that matches a title in raw markup.
fn title_pattern(title: &str) -> Option<Regex> {
    let words: Vec<String> = title.split_whitespace().map(regex::escape).collect();
    if words.is_empty() {
        return None;
    }
    RegexBuilder::new(&words.join(WORD_GAP))
        .case_insensitive(true)
        .build()
        .ok()
}

/// Finds the next occurrence of an HTML tag name at or after `from`.
///
/// `lower` must be the ASCII-lowercased document, so offsets match the original.
fn next_tag(lower: &str, tag: &str, from: usize) -> Option<usize> {
    let mut pos = from;
    while let Some(found) = lower.get(pos..)?.find(tag) {
        let at = pos + found;
        let boundary = lower[at + tag.len()..].chars().next();
        if boundary.is_none_or(|c| c.is_whitespace() || c == '>' || c == '/') {
            return Some(at);
        }
        pos = at + tag.len();
    }
    None
}

/// Finds the last occurrence of an HTML tag name before `before`.
fn prev_tag(lower: &str, tag: &str, before: usize) -> Option<usize> {
    let mut end = before;
    while let Some(at) = lower[..end].rfind(tag) {
        let boundary = lower[at + tag.len()..].chars().next();
        if boundary.is_none_or(|c| c.is_whitespace() || c == '>' || c == '/') {
            return Some(at);
        }
        end = at;
    }
    None
}

/// Returns the end offset (exclusive) of the table starting at `start`, or
/// `None` if the open and close tags never balance.
fn balance(lower: &str, start: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut pos = start;
    loop {
        let open = next_tag(lower, OPEN_TAG, pos);
        let close = next_tag(lower, CLOSE_TAG, pos)?;
        match open {
            Some(o) if o < close => {
                depth += 1;
                pos = o + OPEN_TAG.len();
            }
            _ => {
                depth = depth.checked_sub(1)?;
                let end = lower[close..].find('>').map(|i| close + i + 1)?;
                if depth == 0 {
                    return Some(end);
                }
                pos = end;
            }
        }
    }
}

/// Locates the table for a title occurrence at byte offset `title_at`.
fn table_at(lower: &str, title_at: usize) -> Option<(usize, usize)> {
    let last_open = prev_tag(lower, OPEN_TAG, title_at);
    let last_close = prev_tag(lower, CLOSE_TAG, title_at);
    let inside = match (last_open, last_close) {
        (Some(open), Some(close)) => open > close,
        (Some(_), None) => true,
        _ => false,
    };
    let start = if inside {
        last_open?
    } else {
        next_tag(lower, OPEN_TAG, title_at)?
    };
    balance(lower, start).map(|end| (start, end))
}

/// Returns the table associated with the first occurrence of `title`.
///
/// `None` when the title is absent or the table markup does not balance; callers
/// treat that as "nothing extracted from this filing".
#[must_use]
pub fn find_table<'a>(html: &'a str, title: &str) -> Option<&'a str> {
    find_tables(html, title).into_iter().next()
}

/// Returns one table per occurrence of `title`, in document order.
///
/// Statement titles also appear in tables of contents and cross references, so
/// callers try each candidate until one yields values.
#[must_use]
pub fn find_tables<'a>(html: &'a str, title: &str) -> Vec<&'a str> {
    let Some(pattern) = title_pattern(title) else {
        return Vec::new();
    };
    let lower = html.to_ascii_lowercase();
    let mut spans: Vec<(usize, usize)> = Vec::new();
    for found in pattern.find_iter(html) {
        match table_at(&lower, found.start()) {
            Some(span) if !spans.contains(&span) => spans.push(span),
            Some(_) => {}
            None => debug!(title, offset = found.start(), "Title found without a balanced table"),
        }
    }
    spans.into_iter().map(|(start, end)| &html[start..end]).collect()
}

/// Splits a document into its top-level tables, in document order.
///
/// Used when a filing has no reliable titles and every table is a candidate.
#[must_use]
pub fn all_tables(html: &str) -> Vec<&str> {
    let lower = html.to_ascii_lowercase();
    let mut tables = Vec::new();
    let mut pos = 0;
    while let Some(start) = next_tag(&lower, OPEN_TAG, pos) {
        match balance(&lower, start) {
            Some(end) => {
                tables.push(&html[start..end]);
                pos = end;
            }
            None => break,
        }
    }
    tables
}
