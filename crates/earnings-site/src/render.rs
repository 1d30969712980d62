//! HTML rendering.
//!
//! Pages are plain HTML tables; chart history is embedded as JSON for any
//! client-side script to pick up.

use std::fmt::Write as _;

use html_escape::encode_text;

use earnings_core::{Domain, QuarterRecord};

use crate::dataset::CompanyDataset;
use crate::page::{PageLink, QuarterPage};

const STYLE: &str = "body{font-family:system-ui,sans-serif;margin:2rem auto;max-width:960px;color:#1a1a1a}\
table{border-collapse:collapse;margin-bottom:1.5rem;width:100%}\
th,td{padding:.25rem .5rem;border-bottom:1px solid #e5e5e5}\
td.value{text-align:right;font-variant-numeric:tabular-nums}\
nav{display:flex;justify-content:space-between;margin:1rem 0}";

/// Section headings, in page order.
const SECTIONS: [(Domain, &str); 6] = [
    (Domain::Financials, "Income Statement"),
    (Domain::Segments, "Segment Revenue"),
    (Domain::SegmentProfit, "Segment Operating Income"),
    (Domain::BalanceSheet, "Balance Sheet"),
    (Domain::CashFlow, "Cash Flow"),
    (Domain::Investments, "Investments"),
];

/// Inserts thousands separators into the integral part of a formatted number.
fn group_thousands(formatted: &str) -> String {
    let (sign, digits) = formatted
        .strip_prefix('-')
        .map_or(("", formatted), |rest| ("-", rest));
    let (integral, fraction) = digits.split_once('.').map_or((digits, None), |(i, f)| (i, Some(f)));

    let mut grouped = String::with_capacity(formatted.len() + integral.len() / 3);
    for (i, c) in integral.chars().enumerate() {
        if i > 0 && (integral.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    match fraction {
        Some(fraction) => format!("{sign}{grouped}.{fraction}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Formats a metric for display: percentages for margins and growth, two
/// decimals for per-share figures and prices, grouped integers otherwise.
#[must_use]
pub fn format_value(key: &str, value: Option<f64>) -> String {
    let Some(value) = value else {
        return "\u{2014}".to_string();
    };
    let lower = key.to_ascii_lowercase();
    if lower.ends_with("margin") || lower.contains("growth") {
        format!("{value:.1}%")
    } else if lower.starts_with("eps") || lower.contains("price") || lower.ends_with("ratio") {
        format!("{value:.2}")
    } else if value.fract() == 0.0 {
        group_thousands(&format!("{value:.0}"))
    } else {
        group_thousands(&format!("{value:.2}"))
    }
}

/// Splits a camelCase key into words (`operatingCashFlow` → `Operating cash flow`).
#[must_use]
pub fn humanize(key: &str) -> String {
    let mut words = String::with_capacity(key.len() + 4);
    for (i, c) in key.chars().enumerate() {
        if i == 0 {
            words.extend(c.to_uppercase());
        } else if c.is_ascii_uppercase() {
            words.push(' ');
            words.push(c.to_ascii_lowercase());
        } else {
            words.push(c);
        }
    }
    words
}

fn write_table(html: &mut String, heading: &str, record: &QuarterRecord) {
    let _ = write!(html, "<section><h2>{}</h2><table>", encode_text(heading));
    for (key, value) in record.iter() {
        let _ = write!(
            html,
            "<tr><th scope=\"row\">{}</th><td class=\"value\">{}</td></tr>",
            encode_text(&humanize(key)),
            encode_text(&format_value(key, value)),
        );
    }
    html.push_str("</table></section>");
}

fn write_link(html: &mut String, rel: &str, link: Option<&PageLink>) {
    match link {
        Some(link) => {
            let _ = write!(
                html,
                "<a rel=\"{rel}\" href=\"{}\">{}</a>",
                html_escape::encode_double_quoted_attribute(&link.href),
                encode_text(&link.label),
            );
        }
        None => html.push_str("<span></span>"),
    }
}

fn head(html: &mut String, title: &str) {
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\"><head><meta charset=\"utf-8\">\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
         <title>{}</title><style>{STYLE}</style></head><body>",
        encode_text(title),
    );
}

/// Escapes JSON for embedding inside a `<script>` element.
fn script_json(json: &str) -> String {
    json.replace("</", "<\\/")
}

/// Renders one quarter page.
///
/// `chart_json` is the serialized chart history embedded for scripts.
#[must_use]
pub fn render_page(page: &QuarterPage<'_>, chart_json: &str) -> String {
    let company = page.company;
    let quarter = page.quarter;
    let title = format!("{} ({}) {}", company.display_name, company.symbol, quarter.label);

    let mut html = String::with_capacity(16 * 1024);
    head(&mut html, &title);
    let _ = write!(html, "<header><h1>{}</h1>", encode_text(&title));
    if let Some(date) = page.next_earnings_date {
        let _ = write!(html, "<p>Next earnings: <time datetime=\"{date}\">{date}</time></p>");
    }
    html.push_str("</header><nav>");
    write_link(&mut html, "prev", page.previous.as_ref());
    write_link(&mut html, "next", page.next.as_ref());
    html.push_str("</nav><main>");

    if let Some(price) = quarter.stock_price {
        let _ = write!(html, "<p>Quarter-end price: {}</p>", format_value("price", Some(price)));
    }
    write_table(&mut html, "Key Metrics", &quarter.metrics);
    for (domain, heading) in SECTIONS {
        if let Some(record) = quarter.domain(domain) {
            write_table(&mut html, heading, record);
        }
    }

    let _ = write!(
        html,
        "</main><script id=\"chart-data\" type=\"application/json\">{}</script>\
         <footer><p>Generated {}</p></footer></body></html>\n",
        script_json(chart_json),
        encode_text(page.generated_at),
    );
    html
}

/// Renders the company index listing every quarter page, newest first.
#[must_use]
pub fn render_index(dataset: &CompanyDataset, pages: &[QuarterPage<'_>]) -> String {
    let company = &dataset.company;
    let title = format!("{} ({})", company.display_name, company.symbol);
    let mut html = String::with_capacity(4 * 1024);
    head(&mut html, &title);
    let _ = write!(html, "<h1>{}</h1><ul>", encode_text(&title));
    for page in pages.iter().rev() {
        let _ = write!(
            html,
            "<li><a href=\"quarters/{}/\">{}</a></li>",
            page.quarter.slug,
            encode_text(&page.quarter.label),
        );
    }
    let _ = write!(
        html,
        "</ul><footer><p>Generated {}</p></footer></body></html>\n",
        encode_text(&dataset.generated_at),
    );
    html
}
