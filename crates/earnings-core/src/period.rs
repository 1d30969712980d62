//! Fiscal period definitions.
//!
//! This module defines [`Quarter`] and [`FiscalPeriod`]. Fiscal years are the
//! issuer's own numbering (NVIDIA's FY2025 ends in January 2025, Microsoft's in June
//! 2025) and are never converted to calendar years.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EarningsError;

/// A fiscal quarter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Quarter {
    /// First quarter.
    Q1,
    /// Second quarter.
    Q2,
    /// Third quarter.
    Q3,
    /// Fourth quarter.
    Q4,
}

impl Quarter {
    /// All quarters in fiscal order.
    pub const ALL: [Self; 4] = [Self::Q1, Self::Q2, Self::Q3, Self::Q4];

    /// Returns the quarter number (1-4).
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::Q1 => 1,
            Self::Q2 => 2,
            Self::Q3 => 3,
            Self::Q4 => 4,
        }
    }

    /// Returns the quarter for a number in 1-4.
    #[must_use]
    pub const fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::Q1),
            2 => Some(Self::Q2),
            3 => Some(Self::Q3),
            4 => Some(Self::Q4),
            _ => None,
        }
    }

    /// Returns the key used in JSON documents and directory names (`"Q2"`).
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Q1 => "Q1",
            Self::Q2 => "Q2",
            Self::Q3 => "Q3",
            Self::Q4 => "Q4",
        }
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Quarter {
    type Err = EarningsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim().trim_start_matches(['Q', 'q']);
        digits
            .parse::<u8>()
            .ok()
            .and_then(Self::from_number)
            .ok_or_else(|| EarningsError::InvalidPeriod(s.to_string()))
    }
}

/// A fiscal year and quarter.
///
/// Ordering is chronological: by year, then quarter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FiscalPeriod {
    /// Fiscal year as numbered by the issuer.
    pub year: i32,
    /// Fiscal quarter.
    pub quarter: Quarter,
}

impl FiscalPeriod {
    /// Creates a new fiscal period.
    #[must_use]
    pub const fn new(year: i32, quarter: Quarter) -> Self {
        Self { year, quarter }
    }

    /// The period immediately before this one.
    #[must_use]
    pub const fn previous(self) -> Self {
        match self.quarter {
            Quarter::Q1 => Self::new(self.year - 1, Quarter::Q4),
            Quarter::Q2 => Self::new(self.year, Quarter::Q1),
            Quarter::Q3 => Self::new(self.year, Quarter::Q2),
            Quarter::Q4 => Self::new(self.year, Quarter::Q3),
        }
    }

    /// The period immediately after this one.
    #[must_use]
    pub const fn next(self) -> Self {
        match self.quarter {
            Quarter::Q1 => Self::new(self.year, Quarter::Q2),
            Quarter::Q2 => Self::new(self.year, Quarter::Q3),
            Quarter::Q3 => Self::new(self.year, Quarter::Q4),
            Quarter::Q4 => Self::new(self.year + 1, Quarter::Q1),
        }
    }

    /// The same quarter one fiscal year earlier.
    #[must_use]
    pub const fn year_ago(self) -> Self {
        Self::new(self.year - 1, self.quarter)
    }

    /// Monotonic quarter index, used for window arithmetic.
    #[must_use]
    pub const fn ordinal(self) -> i64 {
        self.year as i64 * 4 + (self.quarter.number() as i64 - 1)
    }

    /// The fiscal year key used in JSON documents (`"FY2024"`).
    #[must_use]
    pub fn year_key(self) -> String {
        format!("FY{}", self.year)
    }

    /// Compact identifier used for page directories (`"FY2024Q2"`).
    #[must_use]
    pub fn slug(self) -> String {
        format!("FY{}{}", self.year, self.quarter)
    }

    /// Human readable label (`"FY2024 Q2"`).
    #[must_use]
    pub fn label(self) -> String {
        format!("FY{} {}", self.year, self.quarter)
    }

    /// Parses a fiscal year key such as `"FY2024"` or `"2024"`.
    pub fn parse_year(s: &str) -> Result<i32, EarningsError> {
        s.trim()
            .trim_start_matches("FY")
            .trim_start_matches("fy")
            .parse::<i32>()
            .map_err(|_| EarningsError::InvalidPeriod(s.to_string()))
    }
}

impl fmt::Display for FiscalPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FY{} {}", self.year, self.quarter)
    }
}

impl FromStr for FiscalPeriod {
    type Err = EarningsError;

    /// Accepts `"FY2024Q2"`, `"FY2024 Q2"` and `"FY2024-Q2"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        let split = upper
            .rfind('Q')
            .ok_or_else(|| EarningsError::InvalidPeriod(s.to_string()))?;
        let (year, quarter) = upper.split_at(split);
        let year = Self::parse_year(year.trim_end_matches([' ', '-', '_']))
            .map_err(|_| EarningsError::InvalidPeriod(s.to_string()))?;
        let quarter = quarter
            .parse::<Quarter>()
            .map_err(|_| EarningsError::InvalidPeriod(s.to_string()))?;
        Ok(Self::new(year, quarter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_navigation() {
        let p = FiscalPeriod::new(2024, Quarter::Q1);
        assert_eq!(p.previous(), FiscalPeriod::new(2023, Quarter::Q4));
        assert_eq!(p.next(), FiscalPeriod::new(2024, Quarter::Q2));
        assert_eq!(p.year_ago(), FiscalPeriod::new(2023, Quarter::Q1));
        assert_eq!(p.previous().next(), p);
        assert_eq!(p.next().ordinal() - p.ordinal(), 1);
    }

    #[test]
    fn test_period_ordering() {
        let mut periods = vec![
            FiscalPeriod::new(2024, Quarter::Q2),
            FiscalPeriod::new(2023, Quarter::Q4),
            FiscalPeriod::new(2024, Quarter::Q1),
        ];
        periods.sort();
        assert_eq!(periods[0], FiscalPeriod::new(2023, Quarter::Q4));
        assert_eq!(periods[2], FiscalPeriod::new(2024, Quarter::Q2));
    }

    #[test]
    fn test_period_parsing() {
        let expected = FiscalPeriod::new(2024, Quarter::Q2);
        assert_eq!("FY2024Q2".parse::<FiscalPeriod>().unwrap(), expected);
        assert_eq!("FY2024 Q2".parse::<FiscalPeriod>().unwrap(), expected);
        assert_eq!("fy2024-q2".parse::<FiscalPeriod>().unwrap(), expected);
        assert!("FY2024Q5".parse::<FiscalPeriod>().is_err());
        assert!("2024".parse::<FiscalPeriod>().is_err());
        assert_eq!("Q3".parse::<Quarter>().unwrap(), Quarter::Q3);
        assert_eq!(FiscalPeriod::parse_year("FY2019").unwrap(), 2019);
    }

    #[test]
    fn test_period_keys() {
        let p = FiscalPeriod::new(2025, Quarter::Q3);
        assert_eq!(p.year_key(), "FY2025");
        assert_eq!(p.slug(), "FY2025Q3");
        assert_eq!(p.label(), "FY2025 Q3");
        assert_eq!(p.to_string(), "FY2025 Q3");
    }
}
