//! Metric records and domain tables.
//!
//! A [`QuarterRecord`] maps metric keys (`revenue`, `operatingIncome`, ...) to a value
//! or `null`. A [`DomainTable`] collects the records of one data domain for every
//! fiscal period and serializes as `{ "FY2024": { "Q2": { ... } } }`.
//!
//! Both types enforce first-write-wins merging: a populated value is never replaced,
//! and `null` counts as unpopulated.

use std::collections::BTreeMap;
use std::collections::btree_map;

use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::period::{FiscalPeriod, Quarter};

/// Largest magnitude written as a JSON integer rather than a float.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Metric values for one fiscal period in one domain.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QuarterRecord(BTreeMap<String, Option<f64>>);

impl QuarterRecord {
    /// Creates an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value for a metric, `None` when absent or `null`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<f64> {
        self.0.get(key).copied().flatten()
    }

    /// Returns true if the metric is present, even as `null`.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Sets a metric, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: Option<f64>) {
        self.0.insert(key.into(), value);
    }

    /// Sets a metric only if it is absent or `null`.
    ///
    /// Returns true if the value was written.
    pub fn fill(&mut self, key: &str, value: Option<f64>) -> bool {
        match self.0.get_mut(key) {
            Some(slot) if slot.is_none() => {
                *slot = value;
                value.is_some()
            }
            Some(_) => false,
            None => {
                self.0.insert(key.to_string(), value);
                value.is_some()
            }
        }
    }

    /// Copies every metric of `other` that is absent or `null` here.
    ///
    /// Returns the number of values written.
    pub fn merge_missing(&mut self, other: &Self) -> usize {
        let mut written = 0;
        for (key, value) in &other.0 {
            if self.fill(key, *value) {
                written += 1;
            }
        }
        written
    }

    /// Returns true if at least one metric has a value.
    #[must_use]
    pub fn has_values(&self) -> bool {
        self.0.values().any(Option::is_some)
    }

    /// Number of metrics, including `null` ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no metrics.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates metrics in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<f64>)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Iterates metric keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl FromIterator<(String, Option<f64>)> for QuarterRecord {
    fn from_iter<I: IntoIterator<Item = (String, Option<f64>)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> FromIterator<(&'a str, Option<f64>)> for QuarterRecord {
    fn from_iter<I: IntoIterator<Item = (&'a str, Option<f64>)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
    }
}

/// Serializes a metric value, writing integral values as JSON integers.
fn serialize_metric<S: Serializer>(value: Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(v) if v.is_finite() && v.fract() == 0.0 && v.abs() < MAX_EXACT_INTEGER => {
            serializer.serialize_i64(v as i64)
        }
        Some(v) if v.is_finite() => serializer.serialize_f64(v),
        _ => serializer.serialize_none(),
    }
}

struct Metric(Option<f64>);

impl Serialize for Metric {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_metric(self.0, serializer)
    }
}

impl Serialize for QuarterRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, &Metric(*value))?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for QuarterRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        BTreeMap::<String, Option<f64>>::deserialize(deserializer).map(Self)
    }
}

/// All records of one data domain, keyed by fiscal period.
///
/// Annual (full fiscal year) records are kept alongside for reconciliation but are
/// not part of the serialized form.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DomainTable {
    quarters: BTreeMap<FiscalPeriod, QuarterRecord>,
    annual: BTreeMap<i32, QuarterRecord>,
}

impl DomainTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the record for a period.
    #[must_use]
    pub fn get(&self, period: FiscalPeriod) -> Option<&QuarterRecord> {
        self.quarters.get(&period)
    }

    /// Returns a single metric for a period.
    #[must_use]
    pub fn value(&self, period: FiscalPeriod, key: &str) -> Option<f64> {
        self.get(period).and_then(|r| r.get(key))
    }

    /// Merges a record into a period, first write wins.
    ///
    /// Returns the number of values written.
    pub fn fill(&mut self, period: FiscalPeriod, record: &QuarterRecord) -> usize {
        self.quarters.entry(period).or_default().merge_missing(record)
    }

    /// Returns the full-year record for a fiscal year.
    #[must_use]
    pub fn annual(&self, year: i32) -> Option<&QuarterRecord> {
        self.annual.get(&year)
    }

    /// Merges a full-year record, first write wins.
    pub fn fill_annual(&mut self, year: i32, record: &QuarterRecord) -> usize {
        self.annual.entry(year).or_default().merge_missing(record)
    }

    /// Fiscal years with an annual record.
    pub fn annual_years(&self) -> impl Iterator<Item = i32> + '_ {
        self.annual.keys().copied()
    }

    /// Periods in chronological order.
    pub fn periods(&self) -> impl Iterator<Item = FiscalPeriod> + '_ {
        self.quarters.keys().copied()
    }

    /// Records in chronological order.
    pub fn iter(&self) -> btree_map::Iter<'_, FiscalPeriod, QuarterRecord> {
        self.quarters.iter()
    }

    /// The most recent period.
    #[must_use]
    pub fn latest(&self) -> Option<FiscalPeriod> {
        self.quarters.keys().next_back().copied()
    }

    /// Number of periods.
    #[must_use]
    pub fn len(&self) -> usize {
        self.quarters.len()
    }

    /// Returns true if there are no quarterly records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.quarters.is_empty()
    }

    /// Drops periods whose record has no values.
    pub fn prune_empty(&mut self) {
        self.quarters.retain(|_, record| record.has_values());
    }
}

impl Serialize for DomainTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut years: BTreeMap<String, BTreeMap<&'static str, &QuarterRecord>> = BTreeMap::new();
        for (period, record) in &self.quarters {
            years
                .entry(period.year_key())
                .or_default()
                .insert(period.quarter.key(), record);
        }
        years.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for DomainTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let years = BTreeMap::<String, BTreeMap<String, QuarterRecord>>::deserialize(deserializer)?;
        let mut table = Self::new();
        for (year_key, quarters) in years {
            let year = FiscalPeriod::parse_year(&year_key).map_err(D::Error::custom)?;
            for (quarter_key, record) in quarters {
                let quarter = quarter_key.parse::<Quarter>().map_err(D::Error::custom)?;
                table.quarters.insert(FiscalPeriod::new(year, quarter), record);
            }
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, Option<f64>)]) -> QuarterRecord {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_fill_first_write_wins() {
        let mut r = record(&[("revenue", Some(100.0)), ("netIncome", None)]);
        assert!(!r.fill("revenue", Some(90.0)));
        assert!(r.fill("netIncome", Some(10.0)));
        assert!(!r.fill("netIncome", Some(11.0)));
        assert!(!r.fill("eps", None));
        assert_eq!(r.get("revenue"), Some(100.0));
        assert_eq!(r.get("netIncome"), Some(10.0));
        assert!(r.contains("eps"));
        assert_eq!(r.get("eps"), None);
    }

    #[test]
    fn test_merge_missing_counts() {
        let mut target = record(&[("a", Some(1.0)), ("b", None)]);
        let source = record(&[("a", Some(2.0)), ("b", Some(3.0)), ("c", Some(4.0))]);
        assert_eq!(target.merge_missing(&source), 2);
        assert_eq!(target.get("a"), Some(1.0));
        assert_eq!(target.get("b"), Some(3.0));
        assert_eq!(target.get("c"), Some(4.0));
    }

    #[test]
    fn test_record_serializes_integers() {
        let r = record(&[("cash", Some(23466.0)), ("eps", Some(1.89)), ("debt", None)]);
        let json = serde_json::to_string(&r).unwrap();
        assert_eq!(json, r#"{"cash":23466,"debt":null,"eps":1.89}"#);
    }

    #[test]
    fn test_table_shape() {
        let mut table = DomainTable::new();
        table.fill(
            FiscalPeriod::new(2024, Quarter::Q2),
            &record(&[("totalAssets", Some(407384.0))]),
        );
        table.fill(
            FiscalPeriod::new(2023, Quarter::Q4),
            &record(&[("totalAssets", Some(402392.0))]),
        );
        table.fill_annual(2023, &record(&[("revenue", Some(307394.0))]));

        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(
            json,
            r#"{"FY2023":{"Q4":{"totalAssets":402392}},"FY2024":{"Q2":{"totalAssets":407384}}}"#
        );

        let back: DomainTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back.len(), 2);
        assert_eq!(
            back.value(FiscalPeriod::new(2024, Quarter::Q2), "totalAssets"),
            Some(407384.0)
        );
        assert!(back.annual(2023).is_none());
        assert_eq!(back.latest(), Some(FiscalPeriod::new(2024, Quarter::Q2)));
    }

    #[test]
    fn test_table_rejects_bad_keys() {
        let result: Result<DomainTable, _> = serde_json::from_str(r#"{"FY2024":{"Q7":{}}}"#);
        assert!(result.is_err());
        let result: Result<DomainTable, _> = serde_json::from_str(r#"{"2024x":{"Q1":{}}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_prune_empty() {
        let mut table = DomainTable::new();
        table.fill(FiscalPeriod::new(2024, Quarter::Q1), &record(&[("a", None)]));
        table.fill(FiscalPeriod::new(2024, Quarter::Q2), &record(&[("a", Some(1.0))]));
        table.prune_empty();
        assert_eq!(table.len(), 1);
    }
}
