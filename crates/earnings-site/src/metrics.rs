//! Derived metrics.
//!
//! Fallbacks fill statement lines a filer does not report from lines it does.
//! They never replace a reported value. Ratios are computed for every quarter
//! and are `null` when an operand is missing.

use earnings_core::QuarterRecord;

/// Keys of the per-quarter metrics record, in output order.
pub const METRIC_KEYS: [&str; 8] = [
    GROSS_MARGIN,
    OPERATING_MARGIN,
    NET_MARGIN,
    REVENUE_GROWTH_YOY,
    REVENUE_GROWTH_QOQ,
    EPS_TTM,
    MARKET_CAP,
    PE_RATIO,
];

/// Gross profit as a percentage of revenue.
pub const GROSS_MARGIN: &str = "grossMargin";
/// Operating income as a percentage of revenue.
pub const OPERATING_MARGIN: &str = "operatingMargin";
/// Net income as a percentage of revenue.
pub const NET_MARGIN: &str = "netMargin";
/// Revenue change against the same quarter a year earlier, in percent.
pub const REVENUE_GROWTH_YOY: &str = "revenueGrowthYoY";
/// Revenue change against the previous quarter, in percent.
pub const REVENUE_GROWTH_QOQ: &str = "revenueGrowthQoQ";
/// Diluted EPS summed over the last four quarters.
pub const EPS_TTM: &str = "epsTtm";
/// Quarter-end price times diluted shares, in millions.
pub const MARKET_CAP: &str = "marketCap";
/// Quarter-end price over trailing EPS.
pub const PE_RATIO: &str = "peRatio";

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn difference(record: &QuarterRecord, minuend: &str, subtrahend: &str) -> Option<f64> {
    Some(round2(record.get(minuend)? - record.get(subtrahend)?))
}

/// Fills `grossProfit`, `sga` and `nonOperatingIncome` when not reported.
pub fn derive_income_statement(record: &mut QuarterRecord) {
    if let Some(gross) = difference(record, "revenue", "costOfRevenue") {
        record.fill("grossProfit", Some(gross));
    }
    if let (Some(marketing), Some(admin)) = (
        record.get("salesAndMarketing"),
        record.get("generalAndAdministrative"),
    ) {
        record.fill("sga", Some(round2(marketing + admin)));
    }
    if let Some(non_operating) = difference(record, "incomeBeforeTax", "operatingIncome") {
        record.fill("nonOperatingIncome", Some(non_operating));
    }
}

/// Fills `freeCashFlow` when not reported. Capital expenditures are printed
/// negative by some filers and positive by others.
pub fn derive_cash_flow(record: &mut QuarterRecord) {
    if let (Some(operating), Some(capex)) =
        (record.get("operatingCashFlow"), record.get("capitalExpenditures"))
    {
        record.fill("freeCashFlow", Some(round2(operating - capex.abs())));
    }
}

/// `part / whole` in percent; `None` when either is missing or `whole` is zero.
#[must_use]
pub fn percent_of(part: Option<f64>, whole: Option<f64>) -> Option<f64> {
    let whole = whole.filter(|w| *w != 0.0)?;
    Some(round2(part? / whole * 100.0))
}

/// Relative change from `previous` to `current` in percent.
#[must_use]
pub fn growth(current: Option<f64>, previous: Option<f64>) -> Option<f64> {
    let previous = previous.filter(|p| *p != 0.0)?;
    Some(round2((current? - previous) / previous.abs() * 100.0))
}

/// Sum of four quarterly values; `None` unless all four are present.
#[must_use]
pub fn trailing_sum(values: [Option<f64>; 4]) -> Option<f64> {
    let mut sum = 0.0;
    for value in values {
        sum += value?;
    }
    Some(round2(sum))
}

/// Inputs for the ratio metrics of one quarter.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RatioInputs {
    /// Revenue of the quarter.
    pub revenue: Option<f64>,
    /// Gross profit of the quarter.
    pub gross_profit: Option<f64>,
    /// Operating income of the quarter.
    pub operating_income: Option<f64>,
    /// Net income of the quarter.
    pub net_income: Option<f64>,
    /// Revenue of the same quarter a year earlier.
    pub revenue_year_ago: Option<f64>,
    /// Revenue of the previous quarter.
    pub revenue_previous: Option<f64>,
    /// Diluted EPS of this and the three previous quarters.
    pub eps_trailing: [Option<f64>; 4],
    /// Diluted shares of the quarter, in millions.
    pub shares_diluted: Option<f64>,
    /// Quarter-end stock price.
    pub price: Option<f64>,
}

/// Computes the metrics record for one quarter. Every key of [`METRIC_KEYS`]
/// is present.
#[must_use]
pub fn ratios(inputs: &RatioInputs) -> QuarterRecord {
    let eps_ttm = trailing_sum(inputs.eps_trailing);
    let market_cap = inputs
        .price
        .zip(inputs.shares_diluted)
        .map(|(price, shares)| round2(price * shares));
    let pe_ratio = inputs
        .price
        .zip(eps_ttm.filter(|eps| *eps > 0.0))
        .map(|(price, eps)| round2(price / eps));

    let mut record = QuarterRecord::new();
    record.set(GROSS_MARGIN, percent_of(inputs.gross_profit, inputs.revenue));
    record.set(OPERATING_MARGIN, percent_of(inputs.operating_income, inputs.revenue));
    record.set(NET_MARGIN, percent_of(inputs.net_income, inputs.revenue));
    record.set(REVENUE_GROWTH_YOY, growth(inputs.revenue, inputs.revenue_year_ago));
    record.set(REVENUE_GROWTH_QOQ, growth(inputs.revenue, inputs.revenue_previous));
    record.set(EPS_TTM, eps_ttm);
    record.set(MARKET_CAP, market_cap);
    record.set(PE_RATIO, pe_ratio);
    record
}
