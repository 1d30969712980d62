//! Label rules: row label patterns mapped to metric keys.
//!
//! Rules are declared as static data ([`Rule`]) and compiled once into a
//! [`LabelMap`]. The first rule whose pattern matches a label wins; a rule may be
//! scoped to a section (the most recent section header row), which is how segment
//! tables tell `Google Services` revenue from `Google Services` operating income.

use regex::{Regex, RegexBuilder};

use earnings_core::{EarningsError, Result};

/// Declarative label rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rule {
    /// Case-insensitive pattern matched against the cleaned label.
    pub pattern: &'static str,
    /// Metric key written when the pattern matches.
    pub key: &'static str,
    /// Pattern the enclosing section header must match.
    pub section: Option<&'static str>,
    /// Per-share or ratio values are never scaled.
    pub unscaled: bool,
    /// Quarterly values sum to the annual figure (flows). Share counts and
    /// per-share amounts do not.
    pub additive: bool,
}

impl Rule {
    /// Creates an unscoped rule.
    #[must_use]
    pub const fn new(pattern: &'static str, key: &'static str) -> Self {
        Self {
            pattern,
            key,
            section: None,
            unscaled: false,
            additive: true,
        }
    }

    /// Restricts the rule to rows under a matching section header.
    #[must_use]
    pub const fn in_section(mut self, section: &'static str) -> Self {
        self.section = Some(section);
        self
    }

    /// Marks the value as per-share (exempt from the statement scale).
    #[must_use]
    pub const fn unscaled(mut self) -> Self {
        self.unscaled = true;
        self
    }

    /// Marks the value as not summing over quarters (weighted share counts,
    /// per-share amounts). No fourth quarter is derived for it.
    #[must_use]
    pub const fn non_additive(mut self) -> Self {
        self.additive = false;
        self
    }
}

/// A compiled [`Rule`].
#[derive(Clone, Debug)]
pub struct LabelRule {
    pattern: Regex,
    section: Option<Regex>,
    /// Metric key.
    pub key: String,
    /// Exempt from scaling.
    pub unscaled: bool,
    /// Sums over quarters.
    pub additive: bool,
}

impl LabelRule {
    /// Returns true if the rule applies to `label` under `section`.
    #[must_use]
    pub fn matches(&self, label: &str, section: Option<&str>) -> bool {
        if !self.pattern.is_match(label) {
            return false;
        }
        match (&self.section, section) {
            (None, _) => true,
            (Some(scope), Some(current)) => scope.is_match(current),
            (Some(_), None) => false,
        }
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| EarningsError::Pattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })
}

/// Ordered set of compiled label rules.
#[derive(Clone, Debug, Default)]
pub struct LabelMap {
    rules: Vec<LabelRule>,
}

impl LabelMap {
    /// Compiles rule groups in order.
    ///
    /// # Errors
    ///
    /// Returns [`EarningsError::Pattern`] for an invalid regular expression.
    pub fn compile(groups: &[&[Rule]]) -> Result<Self> {
        let mut rules = Vec::new();
        for rule in groups.iter().flat_map(|group| group.iter()) {
            rules.push(LabelRule {
                pattern: compile(rule.pattern)?,
                section: rule.section.map(compile).transpose()?,
                key: rule.key.to_string(),
                unscaled: rule.unscaled,
                additive: rule.additive,
            });
        }
        Ok(Self { rules })
    }

    /// First rule matching a label.
    #[must_use]
    pub fn find(&self, label: &str, section: Option<&str>) -> Option<&LabelRule> {
        self.rules.iter().find(|rule| rule.matches(label, section))
    }

    /// Every distinct metric key, in declaration order.
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = Vec::new();
        for rule in &self.rules {
            if !keys.contains(&rule.key.as_str()) {
                keys.push(&rule.key);
            }
        }
        keys
    }

    /// Keys with at least one non-additive rule, in declaration order.
    #[must_use]
    pub fn non_additive_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = Vec::new();
        for rule in self.rules.iter().filter(|rule| !rule.additive) {
            if !keys.contains(&rule.key.as_str()) {
                keys.push(&rule.key);
            }
        }
        keys
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if there are no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
