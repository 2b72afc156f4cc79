//! Per-month budget containers and their chronological keys.

use std::{fmt, str::FromStr};

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use super::{
    category::Category,
    common::{find_by_id, find_by_id_mut},
};

/// Identifies a calendar month; ordered chronologically and rendered as `"{year}-{month}"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BudgetMonthKey {
    pub year: i32,
    pub month: u32,
}

impl BudgetMonthKey {
    /// Returns `None` unless `month` lies in `1..=12`.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn previous(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    pub fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }
}

impl fmt::Display for BudgetMonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.year, self.month)
    }
}

/// Raised when a month key string is not `"{year}-{month}"`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid budget month key `{0}`")]
pub struct ParseMonthKeyError(pub String);

impl FromStr for BudgetMonthKey {
    type Err = ParseMonthKeyError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseMonthKeyError(raw.to_string());
        let (year, month) = raw.trim().rsplit_once('-').ok_or_else(invalid)?;
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        BudgetMonthKey::new(year, month).ok_or_else(invalid)
    }
}

impl Serialize for BudgetMonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BudgetMonthKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// The category tree plus income figures for one calendar month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyBudget {
    pub year: i32,
    pub month: u32,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub gross_income: f64,
    #[serde(default)]
    pub net_income: f64,
}

impl MonthlyBudget {
    pub fn new(key: BudgetMonthKey, categories: Vec<Category>) -> Self {
        Self {
            year: key.year,
            month: key.month,
            categories,
            gross_income: 0.0,
            net_income: 0.0,
        }
    }

    pub fn key(&self) -> BudgetMonthKey {
        BudgetMonthKey {
            year: self.year,
            month: self.month,
        }
    }

    /// Structural copy of this month's categories and incomes under a new key.
    pub fn carry_forward(&self, key: BudgetMonthKey) -> Self {
        Self {
            year: key.year,
            month: key.month,
            categories: self.categories.clone(),
            gross_income: self.gross_income,
            net_income: self.net_income,
        }
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        find_by_id(&self.categories, id)
    }

    pub fn category_mut(&mut self, id: &str) -> Option<&mut Category> {
        find_by_id_mut(&mut self.categories, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_keys_order_chronologically() {
        let feb: BudgetMonthKey = "2026-2".parse().unwrap();
        let oct: BudgetMonthKey = "2026-10".parse().unwrap();
        let dec_prior: BudgetMonthKey = "2025-12".parse().unwrap();
        assert!(dec_prior < feb);
        assert!(feb < oct);
        assert_eq!(oct.to_string(), "2026-10");
    }

    #[test]
    fn month_keys_reject_out_of_range_months() {
        assert!("2026-13".parse::<BudgetMonthKey>().is_err());
        assert!("2026-0".parse::<BudgetMonthKey>().is_err());
        assert!("2026".parse::<BudgetMonthKey>().is_err());
        assert!(BudgetMonthKey::new(2026, 12).is_some());
    }

    #[test]
    fn neighbours_wrap_across_years() {
        let jan = BudgetMonthKey::new(2026, 1).unwrap();
        assert_eq!(jan.previous(), BudgetMonthKey::new(2025, 12).unwrap());
        assert_eq!(jan.previous().next(), jan);
    }

    #[test]
    fn month_keys_serialize_as_map_keys() {
        let mut map = std::collections::BTreeMap::new();
        map.insert(BudgetMonthKey::new(2026, 3).unwrap(), 1);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"2026-3":1}"#);
        let back: std::collections::BTreeMap<BudgetMonthKey, i32> =
            serde_json::from_str(&json).unwrap();
        assert_eq!(back, map);
    }
}
