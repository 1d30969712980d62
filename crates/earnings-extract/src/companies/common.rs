//! Statement titles and label rules shared by every filer.
//!
//! Patterns match cleaned row labels case-insensitively. Order matters: the
//! first matching rule wins, so narrower patterns come first.

use earnings_core::{DocumentType, Domain, Result};
use earnings_html::{ColumnPick, Rule};

use crate::statement::{ComparativeTarget, PeriodScope, StatementSpec};

pub(crate) const INCOME_TITLES: &[&str] = &[
    "STATEMENTS OF INCOME",
    "STATEMENTS OF OPERATIONS",
    "STATEMENT OF INCOME",
    "STATEMENT OF OPERATIONS",
    "STATEMENTS OF EARNINGS",
    "INCOME STATEMENT",
];

pub(crate) const BALANCE_TITLES: &[&str] = &[
    "BALANCE SHEETS",
    "BALANCE SHEET",
    "STATEMENTS OF FINANCIAL POSITION",
];

pub(crate) const CASH_FLOW_TITLES: &[&str] = &[
    "STATEMENTS OF CASH FLOWS",
    "STATEMENT OF CASH FLOWS",
    "CASH FLOW STATEMENTS",
];

pub(crate) const INVESTMENT_TITLES: &[&str] = &[
    "OTHER INCOME (EXPENSE), NET",
    "INTEREST AND OTHER INCOME",
    "OTHER INCOME, NET",
];

pub(crate) const INCOME: &[Rule] = &[
    Rule::new(r"^(total )?(net )?(revenues?|sales)$", "revenue"),
    Rule::new(r"^(total )?cost of (revenues?|sales)$", "costOfRevenue"),
    Rule::new(r"^gross (profit|margin)$", "grossProfit"),
    Rule::new(
        r"^research and development$|^technology and (content|development|infrastructure)$",
        "researchAndDevelopment",
    ),
    Rule::new(r"^(sales and |selling and )?marketing$", "salesAndMarketing"),
    Rule::new(
        r"^general and administrative$|^(selling|sales|marketing), general,? and administrative$",
        "generalAndAdministrative",
    ),
    Rule::new(
        r"^(total )?(operating income|income from operations|income \(loss\) from operations|operating income \(loss\))$",
        "operatingIncome",
    ),
    Rule::new(
        r"^income( \(loss\))? before (provision for )?income taxes",
        "incomeBeforeTax",
    ),
    Rule::new(r"^(total )?(interest and )?other (income|\(expense\)|expense)", "otherIncome"),
    Rule::new(
        r"^(provision for|\(?benefit\)? ?from|\(?benefit from\)? provision for|provision for \(benefit from\)) income taxes|^income tax (expense|provision|\(?benefit\)?)",
        "incomeTax",
    ),
    Rule::new(
        r"^net income( \(loss\))?$|^net (income|earnings)( \(loss\))? attributable to common",
        "netIncome",
    ),
];

/// Share counts come before per-share figures: share section headers also
/// mention "per share".
pub(crate) const SHARES_AND_EPS: &[Rule] = &[
    Rule::new(r"^basic", "sharesBasic").in_section(r"^(weighted|shares|number of shares)").non_additive(),
    Rule::new(r"^diluted", "sharesDiluted").in_section(r"^(weighted|shares|number of shares)").non_additive(),
    Rule::new(r"^(weighted[- ]average|shares used|number of shares).*\bbasic", "sharesBasic").non_additive(),
    Rule::new(r"^(weighted[- ]average|shares used|number of shares).*\bdiluted", "sharesDiluted").non_additive(),
    Rule::new(r"^basic", "epsBasic").in_section(r"per share|^earnings per").unscaled().non_additive(),
    Rule::new(r"^diluted", "epsDiluted").in_section(r"per share|^earnings per").unscaled().non_additive(),
    Rule::new(r"^basic (net income|earnings|eps)|per share.{0,6}\bbasic$", "epsBasic").unscaled().non_additive(),
    Rule::new(r"^diluted (net income|earnings|eps)|per share.{0,6}\bdiluted$", "epsDiluted").unscaled().non_additive(),
];

pub(crate) const BALANCE_SHEET: &[Rule] = &[
    Rule::new(r"^cash and cash equivalents$", "cashAndEquivalents"),
    Rule::new(
        r"^(short-term |current )?marketable securities$|^short-term investments$",
        "marketableSecurities",
    ),
    Rule::new(r"^accounts receivable", "accountsReceivable"),
    Rule::new(r"^inventor(y|ies)", "inventories"),
    Rule::new(r"^total current assets$", "totalCurrentAssets"),
    Rule::new(r"^property(,| and) (plant )?(and )?equipment", "propertyAndEquipment"),
    Rule::new(r"^goodwill$", "goodwill"),
    Rule::new(r"^total assets$", "totalAssets"),
    Rule::new(r"^accounts payable", "accountsPayable"),
    Rule::new(r"^total current liabilities$", "totalCurrentLiabilities"),
    Rule::new(r"^long-term debt", "longTermDebt"),
    Rule::new(r"^total liabilities$", "totalLiabilities"),
    Rule::new(r"^total (stock|share)holders'? equity$", "stockholdersEquity"),
];

pub(crate) const CASH_FLOW: &[Rule] = &[
    Rule::new(r"^depreciation", "depreciationAndAmortization"),
    Rule::new(r"^(stock|share)-based compensation", "stockBasedCompensation"),
    Rule::new(r"^(net )?cash\b.*\boperating activities", "operatingCashFlow"),
    Rule::new(
        r"^(capital expenditures|(purchases|acquisitions?|additions|payments for acquisition) (of|to) property)",
        "capitalExpenditures",
    ),
    Rule::new(r"^(net )?cash\b.*\binvesting activities", "investingCashFlow"),
    Rule::new(
        r"^(payments for )?repurchases? of (common |capital )?stock|^common stock repurchased",
        "shareRepurchases",
    ),
    Rule::new(r"^(payments? (of|for) |cash )?dividends", "dividendsPaid"),
    Rule::new(r"^(net )?cash\b.*\bfinancing activities", "financingCashFlow"),
    Rule::new(r"^free cash flow", "freeCashFlow"),
];

pub(crate) const INVESTMENTS: &[Rule] = &[
    Rule::new(r"^interest income", "interestIncome"),
    Rule::new(r"^interest expense", "interestExpense"),
    Rule::new(r"equity securities", "equitySecuritiesGains"),
    Rule::new(r"debt securities", "debtSecuritiesGains"),
];

/// Quarterly income statement from press releases and 10-Qs.
pub(crate) fn financials() -> Result<StatementSpec> {
    StatementSpec::rows(Domain::Financials, INCOME_TITLES, &[INCOME, SHARES_AND_EPS])
}

/// Balance sheet; a 10-K balance sheet is the fourth quarter's. The prior
/// column is the previous fiscal year end.
pub(crate) fn balance_sheet() -> Result<StatementSpec> {
    Ok(
        StatementSpec::rows(Domain::BalanceSheet, BALANCE_TITLES, &[BALANCE_SHEET])?
            .documents(&[
                DocumentType::PressRelease,
                DocumentType::Form10Q,
                DocumentType::Form10K,
            ])
            .comparative(ColumnPick::PriorYear, ComparativeTarget::PriorYearEnd),
    )
}

/// Cash flow statement as printed in press releases.
pub(crate) fn cash_flow(release_scope: PeriodScope) -> Result<StatementSpec> {
    Ok(
        StatementSpec::rows(Domain::CashFlow, CASH_FLOW_TITLES, &[CASH_FLOW])?
            .documents(&[DocumentType::PressRelease])
            .scope(release_scope),
    )
}

/// Investment income and gains, from the other income note of 10-Qs.
pub(crate) fn investments() -> Result<StatementSpec> {
    Ok(
        StatementSpec::rows(Domain::Investments, INVESTMENT_TITLES, &[INVESTMENTS])?
            .documents(&[DocumentType::Form10Q]),
    )
}

/// Statements every filer shares.
///
/// `release_cash_flow` is the scope of the press release cash flow statement:
/// some filers print the quarter, others the fiscal year to date.
pub(crate) fn standard(release_cash_flow: PeriodScope) -> Result<Vec<StatementSpec>> {
    let financials = financials()?;
    let release_cash = cash_flow(release_cash_flow)?;
    let filing_cash = release_cash
        .clone()
        .documents(&[DocumentType::Form10Q])
        .scope(PeriodScope::YearToDate);
    let investments = investments()?;
    Ok(vec![
        financials.annual(),
        financials,
        balance_sheet()?,
        filing_cash.annual(),
        filing_cash,
        release_cash,
        investments.annual(),
        investments,
    ])
}

/// Same quarter one year earlier: the comparative column of segment tables.
pub(crate) const fn restated(spec: StatementSpec) -> StatementSpec {
    spec.comparative(ColumnPick::PriorYear, ComparativeTarget::YearAgo)
}

/// Segment names listed as rows under a section header such as `Revenues:`.
pub(crate) fn names_in_section(
    names: &[(&'static str, &'static str)],
    section: &'static str,
) -> Vec<Rule> {
    names
        .iter()
        .map(|&(pattern, key)| Rule::new(pattern, key).in_section(section))
        .collect()
}

/// Segment names used as section headers over metric rows (`Data Center:`
/// followed by `Net revenue`, `Operating income`).
pub(crate) fn metric_under_names(
    names: &[(&'static str, &'static str)],
    metric: &'static str,
) -> Vec<Rule> {
    names
        .iter()
        .map(|&(section, key)| Rule::new(metric, key).in_section(section))
        .collect()
}

/// Segment revenue and segment profit statements: quarterly with restated
/// comparatives, plus the 10-K annual variants.
pub(crate) fn segment_statements(
    titles: &[&str],
    revenue: &[Rule],
    profit: &[Rule],
) -> Result<Vec<StatementSpec>> {
    let segments = restated(StatementSpec::rows(Domain::Segments, titles, &[revenue])?);
    let segment_profit = restated(StatementSpec::rows(Domain::SegmentProfit, titles, &[profit])?);
    Ok(vec![
        segments.annual(),
        segments,
        segment_profit.annual(),
        segment_profit,
    ])
}

/// Segment statements for tables with one column per segment.
pub(crate) fn transposed_segments(
    titles: &[&str],
    columns: &[Rule],
    revenue_row: &str,
    profit_row: Option<&str>,
) -> Result<Vec<StatementSpec>> {
    let segments = StatementSpec::transposed(Domain::Segments, titles, revenue_row, &[columns])?;
    let mut specs = vec![segments.annual(), segments];
    if let Some(row) = profit_row {
        let profit = StatementSpec::transposed(Domain::SegmentProfit, titles, row, &[columns])?;
        specs.push(profit.annual());
        specs.push(profit);
    }
    Ok(specs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use earnings_html::LabelMap;

    fn key(rules: &[&[Rule]], label: &str, section: Option<&str>) -> Option<String> {
        LabelMap::compile(rules)
            .unwrap()
            .find(label, section)
            .map(|rule| rule.key.clone())
    }

    #[test]
    fn test_income_labels() {
        let rules: &[&[Rule]] = &[INCOME, SHARES_AND_EPS];
        let cases = [
            ("Revenues", "revenue"),
            ("Total net sales", "revenue"),
            ("Net revenue", "revenue"),
            ("Total cost of sales", "costOfRevenue"),
            ("Cost of revenue", "costOfRevenue"),
            ("Technology and infrastructure", "researchAndDevelopment"),
            ("Marketing", "salesAndMarketing"),
            ("Selling, general and administrative", "generalAndAdministrative"),
            ("Marketing, general and administrative", "generalAndAdministrative"),
            ("Income from operations", "operatingIncome"),
            ("Operating income (loss)", "operatingIncome"),
            ("Other income (expense), net", "otherIncome"),
            ("Interest and other income, net", "otherIncome"),
            ("Income before income taxes", "incomeBeforeTax"),
            ("Provision for income taxes", "incomeTax"),
            ("Net income", "netIncome"),
            ("Net income attributable to common stockholders", "netIncome"),
            ("Basic earnings per share", "epsBasic"),
            ("Diluted net income per share", "epsDiluted"),
            ("Net income per share - diluted", "epsDiluted"),
            ("Weighted-average basic shares", "sharesBasic"),
        ];
        for (label, expected) in cases {
            assert_eq!(key(rules, label, None).as_deref(), Some(expected), "{label}");
        }
        assert_eq!(key(rules, "Net product sales", None), None);
    }

    #[test]
    fn test_share_sections() {
        let rules: &[&[Rule]] = &[INCOME, SHARES_AND_EPS];
        assert_eq!(
            key(rules, "Basic", Some("Net income per share:")).as_deref(),
            Some("epsBasic")
        );
        assert_eq!(
            key(rules, "Diluted", Some("Shares used in computing earnings per share:")).as_deref(),
            Some("sharesDiluted")
        );
        assert_eq!(
            key(rules, "Basic", Some("Weighted-average shares used to compute earnings per share:"))
                .as_deref(),
            Some("sharesBasic")
        );
    }

    #[test]
    fn test_balance_and_cash_labels() {
        let rules: &[&[Rule]] = &[BALANCE_SHEET, CASH_FLOW, INVESTMENTS];
        let cases = [
            ("Cash and cash equivalents", "cashAndEquivalents"),
            ("Accounts receivable, net", "accountsReceivable"),
            ("Property and equipment, net", "propertyAndEquipment"),
            ("Property, plant and equipment, net", "propertyAndEquipment"),
            ("Total stockholders' equity", "stockholdersEquity"),
            ("Total shareholders' equity", "stockholdersEquity"),
            ("Net cash provided by operating activities", "operatingCashFlow"),
            ("Cash generated by operating activities", "operatingCashFlow"),
            ("Net cash used in investing activities", "investingCashFlow"),
            ("Purchases of property and equipment", "capitalExpenditures"),
            ("Additions to property and equipment", "capitalExpenditures"),
            ("Repurchases of common stock", "shareRepurchases"),
            ("Common stock repurchased", "shareRepurchases"),
            ("Dividends paid", "dividendsPaid"),
            ("Payments for dividends and dividend equivalents", "dividendsPaid"),
            ("Stock-based compensation expense", "stockBasedCompensation"),
            ("Gain (loss) on equity securities, net", "equitySecuritiesGains"),
            ("Gain (loss) on debt securities, net", "debtSecuritiesGains"),
        ];
        for (label, expected) in cases {
            assert_eq!(key(rules, label, None).as_deref(), Some(expected), "{label}");
        }
        assert_eq!(
            key(rules, "Adjustments to reconcile net income to net cash provided by operating activities:", None),
            None
        );
    }

    #[test]
    fn test_standard_statements() {
        let specs = standard(PeriodScope::Quarter).unwrap();
        let count = |domain, document| {
            specs
                .iter()
                .filter(|s| s.domain == domain && s.applies_to(document))
                .count()
        };
        assert_eq!(count(Domain::Financials, DocumentType::Form10K), 1);
        assert_eq!(count(Domain::CashFlow, DocumentType::Form10Q), 1);
        assert_eq!(count(Domain::CashFlow, DocumentType::PressRelease), 1);
        assert_eq!(count(Domain::BalanceSheet, DocumentType::Form10K), 1);
        assert_eq!(count(Domain::Investments, DocumentType::PressRelease), 0);
    }
}
