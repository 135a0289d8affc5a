//! Monthly budgets per category
//!
//! A zero or absent limit means no budget is set for that category.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::money::Money;

/// Mapping from category name to monthly limit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Budgets(BTreeMap<String, Money>);

impl Budgets {
    pub fn new() -> Self {
        Self::default()
    }

    /// The limit for a category, if one is set (> 0)
    pub fn limit_for(&self, category: &str) -> Option<Money> {
        self.0.get(category).copied().filter(|m| m.is_positive())
    }

    /// Set the limit for a category
    pub fn set(&mut self, category: impl Into<String>, limit: Money) {
        self.0.insert(category.into(), limit);
    }

    /// Merge another set of limits into this one, overwriting shared categories
    pub fn merge(&mut self, other: Budgets) {
        self.0.extend(other.0);
    }

    /// Categories with a limit above zero
    pub fn active(&self) -> impl Iterator<Item = (&str, Money)> {
        self.0
            .iter()
            .filter(|(_, m)| m.is_positive())
            .map(|(c, m)| (c.as_str(), *m))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Money)> {
        self.0.iter().map(|(c, m)| (c.as_str(), *m))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Money)> for Budgets {
    fn from_iter<I: IntoIterator<Item = (String, Money)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_limit_is_no_budget() {
        let mut budgets = Budgets::new();
        budgets.set("Food", Money::from_cents(50_000));
        budgets.set("Health", Money::zero());

        assert_eq!(budgets.limit_for("Food"), Some(Money::from_cents(50_000)));
        assert_eq!(budgets.limit_for("Health"), None);
        assert_eq!(budgets.limit_for("Travel"), None);
        assert_eq!(budgets.active().count(), 1);
    }

    #[test]
    fn test_merge_overwrites() {
        let mut budgets: Budgets = vec![
            ("Food".to_string(), Money::from_cents(100)),
            ("Shopping".to_string(), Money::from_cents(200)),
        ]
        .into_iter()
        .collect();
        budgets.merge(vec![("Food".to_string(), Money::from_cents(300))].into_iter().collect());

        assert_eq!(budgets.limit_for("Food"), Some(Money::from_cents(300)));
        assert_eq!(budgets.limit_for("Shopping"), Some(Money::from_cents(200)));
        assert_eq!(budgets.len(), 2);
    }

    #[test]
    fn test_serialized_as_plain_object() {
        let mut budgets = Budgets::new();
        budgets.set("Food", Money::from_cents(25_050));
        assert_eq!(serde_json::to_string(&budgets).unwrap(), r#"{"Food":250.5}"#);
    }
}
