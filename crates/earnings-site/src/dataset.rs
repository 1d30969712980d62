//! Company dataset assembly.
//!
//! Merges a company's domain tables into one chronological series of quarters
//! and attaches derived metrics.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, warn};

use earnings_core::{Company, DatasetStore, Domain, DomainTable, FiscalPeriod, Quarter, QuarterRecord};

use crate::metrics::{RatioInputs, derive_cash_flow, derive_income_statement, ratios};

/// Key of the price in the stock price table.
const PRICE_KEY: &str = "price";

/// Everything known about one fiscal quarter.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuarterData {
    /// The fiscal period.
    #[serde(skip)]
    pub period: FiscalPeriod,
    /// Fiscal year as numbered by the issuer.
    pub fiscal_year: i32,
    /// Fiscal quarter.
    pub quarter: Quarter,
    /// Display label (`FY2024 Q2`).
    pub label: String,
    /// Page directory name (`FY2024Q2`).
    pub slug: String,
    /// Income statement.
    pub financials: Option<QuarterRecord>,
    /// Balance sheet.
    pub balance_sheet: Option<QuarterRecord>,
    /// Cash flow statement.
    pub cash_flow: Option<QuarterRecord>,
    /// Revenue by segment.
    pub segments: Option<QuarterRecord>,
    /// Operating income by segment.
    pub segment_profit: Option<QuarterRecord>,
    /// Investment income and gains.
    pub investments: Option<QuarterRecord>,
    /// Quarter-end stock price.
    pub stock_price: Option<f64>,
    /// Derived ratios.
    pub metrics: QuarterRecord,
}

impl QuarterData {
    fn new(period: FiscalPeriod) -> Self {
        Self {
            period,
            fiscal_year: period.year,
            quarter: period.quarter,
            label: period.label(),
            slug: period.slug(),
            financials: None,
            balance_sheet: None,
            cash_flow: None,
            segments: None,
            segment_profit: None,
            investments: None,
            stock_price: None,
            metrics: QuarterRecord::new(),
        }
    }

    /// The record of one domain.
    #[must_use]
    pub const fn domain(&self, domain: Domain) -> Option<&QuarterRecord> {
        match domain {
            Domain::Financials => self.financials.as_ref(),
            Domain::BalanceSheet => self.balance_sheet.as_ref(),
            Domain::CashFlow => self.cash_flow.as_ref(),
            Domain::Segments => self.segments.as_ref(),
            Domain::SegmentProfit => self.segment_profit.as_ref(),
            Domain::Investments => self.investments.as_ref(),
            Domain::StockPrice => None,
        }
    }

    fn slot(&mut self, domain: Domain) -> Option<&mut Option<QuarterRecord>> {
        match domain {
            Domain::Financials => Some(&mut self.financials),
            Domain::BalanceSheet => Some(&mut self.balance_sheet),
            Domain::CashFlow => Some(&mut self.cash_flow),
            Domain::Segments => Some(&mut self.segments),
            Domain::SegmentProfit => Some(&mut self.segment_profit),
            Domain::Investments => Some(&mut self.investments),
            Domain::StockPrice => None,
        }
    }

    /// A single income statement value.
    #[must_use]
    pub fn income(&self, key: &str) -> Option<f64> {
        self.financials.as_ref().and_then(|record| record.get(key))
    }
}

/// One company's full history.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyDataset {
    /// Company metadata.
    pub company: Company,
    /// Generation timestamp (RFC 3339).
    pub generated_at: String,
    /// Date of the next earnings release, if announced.
    pub next_earnings_date: Option<NaiveDate>,
    /// Quarters in chronological order.
    pub quarters: Vec<QuarterData>,
}

impl CompanyDataset {
    /// Builds a dataset from domain tables and a stock price table.
    #[must_use]
    pub fn assemble(
        company: Company,
        tables: &BTreeMap<Domain, DomainTable>,
        prices: &DomainTable,
    ) -> Self {
        let periods: BTreeSet<FiscalPeriod> =
            tables.values().flat_map(DomainTable::periods).collect();

        let mut quarters: Vec<QuarterData> = periods
            .into_iter()
            .map(|period| {
                let mut quarter = QuarterData::new(period);
                for (domain, table) in tables {
                    if let (Some(slot), Some(record)) = (quarter.slot(*domain), table.get(period)) {
                        *slot = Some(record.clone());
                    }
                }
                if let Some(income) = quarter.financials.as_mut() {
                    derive_income_statement(income);
                }
                if let Some(cash) = quarter.cash_flow.as_mut() {
                    derive_cash_flow(cash);
                }
                quarter.stock_price = prices.value(period, PRICE_KEY);
                quarter
            })
            .collect();

        let index: BTreeMap<FiscalPeriod, usize> = quarters
            .iter()
            .enumerate()
            .map(|(i, quarter)| (quarter.period, i))
            .collect();
        let income = |period: FiscalPeriod, key: &str| {
            index
                .get(&period)
                .and_then(|i| quarters[*i].income(key))
        };
        let metrics: Vec<QuarterRecord> = quarters
            .iter()
            .map(|quarter| {
                let period = quarter.period;
                let previous = period.previous();
                let inputs = RatioInputs {
                    revenue: quarter.income("revenue"),
                    gross_profit: quarter.income("grossProfit"),
                    operating_income: quarter.income("operatingIncome"),
                    net_income: quarter.income("netIncome"),
                    revenue_year_ago: income(period.year_ago(), "revenue"),
                    revenue_previous: income(previous, "revenue"),
                    eps_trailing: [
                        quarter.income("epsDiluted"),
                        income(previous, "epsDiluted"),
                        income(previous.previous(), "epsDiluted"),
                        income(previous.previous().previous(), "epsDiluted"),
                    ],
                    shares_diluted: quarter.income("sharesDiluted"),
                    price: quarter.stock_price,
                };
                ratios(&inputs)
            })
            .collect();
        for (quarter, metrics) in quarters.iter_mut().zip(metrics) {
            quarter.metrics = metrics;
        }

        Self {
            company,
            generated_at: String::new(),
            next_earnings_date: None,
            quarters,
        }
    }

    /// Loads every domain of a company from a store and assembles the dataset.
    ///
    /// A domain that cannot be loaded is logged and left empty.
    #[must_use]
    pub fn load(company: Company, store: &dyn DatasetStore) -> Self {
        let load = |domain: Domain| {
            store.load_table(&company.name, domain).unwrap_or_else(|e| {
                warn!(company = %company.name, %domain, error = %e, "Domain unavailable");
                DomainTable::new()
            })
        };
        let tables: BTreeMap<Domain, DomainTable> = Domain::EXTRACTED
            .into_iter()
            .map(|domain| (domain, load(domain)))
            .collect();
        let prices = load(Domain::StockPrice);
        debug!(
            company = %company.name,
            periods = tables.values().map(DomainTable::len).max().unwrap_or(0),
            prices = prices.len(),
            "Loaded domain tables"
        );
        Self::assemble(company, &tables, &prices)
    }

    /// Sets the generation timestamp and the next earnings date.
    #[must_use]
    pub fn stamped(mut self, generated_at: String, next_earnings_date: Option<NaiveDate>) -> Self {
        self.generated_at = generated_at;
        self.next_earnings_date = next_earnings_date;
        self
    }

    /// The most recent quarter.
    #[must_use]
    pub fn latest(&self) -> Option<&QuarterData> {
        self.quarters.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use earnings_store::MemoryStore;

    fn record(pairs: &[(&str, f64)]) -> QuarterRecord {
        pairs.iter().map(|(key, value)| (*key, Some(*value))).collect()
    }

    fn table(rows: &[(FiscalPeriod, QuarterRecord)]) -> DomainTable {
        let mut table = DomainTable::new();
        for (period, record) in rows {
            table.fill(*period, record);
        }
        table
    }

    fn company() -> Company {
        Company::new("alphabet", "Alphabet", "GOOGL", "1652044")
    }

    #[test]
    fn test_assemble_merges_domains_and_derives() {
        let q1 = FiscalPeriod::new(2024, Quarter::Q1);
        let q2 = FiscalPeriod::new(2024, Quarter::Q2);
        let mut tables = BTreeMap::new();
        tables.insert(
            Domain::Financials,
            table(&[
                (q1, record(&[("revenue", 80539.0), ("epsDiluted", 1.89)])),
                (q2, record(&[("revenue", 84742.0), ("costOfRevenue", 35507.0), ("epsDiluted", 1.89)])),
            ]),
        );
        tables.insert(
            Domain::BalanceSheet,
            table(&[(q2, record(&[("cashAndEquivalents", 23466.0)]))]),
        );
        let prices = table(&[(q2, record(&[("price", 182.15)]))]);

        let dataset = CompanyDataset::assemble(company(), &tables, &prices);
        assert_eq!(dataset.quarters.len(), 2);
        let first = &dataset.quarters[0];
        assert_eq!(first.period, q1);
        assert!(first.balance_sheet.is_none());
        assert_eq!(first.stock_price, None);

        let latest = dataset.latest().unwrap();
        assert_eq!(latest.income("grossProfit"), Some(49235.0));
        assert_eq!(latest.domain(Domain::BalanceSheet).unwrap().get("cashAndEquivalents"), Some(23466.0));
        assert_eq!(latest.stock_price, Some(182.15));
        assert_eq!(latest.metrics.get("revenueGrowthQoQ"), Some(5.22));
        assert_eq!(latest.metrics.get("epsTtm"), None);
    }

    #[test]
    fn test_missing_domains_serialize_as_null() {
        let store = MemoryStore::new();
        store
            .save_table(
                "alphabet",
                Domain::Financials,
                &table(&[(FiscalPeriod::new(2024, Quarter::Q2), record(&[("revenue", 1.0)]))]),
            )
            .unwrap();
        let dataset = CompanyDataset::load(company(), &store).stamped("2025-01-01T00:00:00Z".to_string(), None);
        let json = serde_json::to_value(&dataset).unwrap();
        let quarter = &json["quarters"][0];
        assert_eq!(quarter["fiscalYear"], 2024);
        assert_eq!(quarter["quarter"], "Q2");
        assert_eq!(quarter["slug"], "FY2024Q2");
        assert!(quarter["segments"].is_null());
        assert_eq!(quarter["financials"]["revenue"], 1);
        assert_eq!(json["company"]["displayName"], "Alphabet");
        assert_eq!(json["generatedAt"], "2025-01-01T00:00:00Z");
        assert!(json["nextEarningsDate"].is_null());
    }
}
