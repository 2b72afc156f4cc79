//! Net-worth summary: assets minus liabilities. Lives for the session only.

use serde::{Deserialize, Serialize};

use super::{amount::RawAmount, common::*};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WealthItem {
    pub id: String,
    pub name: String,
    pub amount: f64,
}

impl WealthItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            amount: 0.0,
        }
    }
}

impl Amounted for WealthItem {
    fn amount(&self) -> f64 {
        self.amount
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WealthSide {
    Asset,
    Liability,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WealthSheet {
    pub assets: Vec<WealthItem>,
    pub liabilities: Vec<WealthItem>,
}

impl Default for WealthSheet {
    fn default() -> Self {
        Self {
            assets: vec![
                WealthItem::new("1", "Savings account"),
                WealthItem::new("2", "Investments"),
                WealthItem::new("3", "Property"),
                WealthItem::new("4", "Other assets"),
            ],
            liabilities: vec![
                WealthItem::new("1", "Credit cards"),
                WealthItem::new("2", "Loans"),
                WealthItem::new("3", "Mortgage"),
                WealthItem::new("4", "Other debt"),
            ],
        }
    }
}

impl WealthSheet {
    pub fn total_assets(&self) -> f64 {
        self.assets.iter().map(Amounted::amount).sum()
    }

    pub fn total_liabilities(&self) -> f64 {
        self.liabilities.iter().map(Amounted::amount).sum()
    }

    /// May be negative when debt outweighs assets.
    pub fn net_worth(&self) -> f64 {
        self.total_assets() - self.total_liabilities()
    }

    /// Returns a copy with one line's amount replaced; unknown ids leave it unchanged.
    pub fn with_amount<'a>(
        &self,
        side: WealthSide,
        id: &str,
        value: impl Into<RawAmount<'a>>,
    ) -> Self {
        let mut next = self.clone();
        let items = match side {
            WealthSide::Asset => &mut next.assets,
            WealthSide::Liability => &mut next.liabilities,
        };
        if let Some(item) = items.iter_mut().find(|item| item.id == id) {
            item.amount = value.into().to_cents();
        }
        next
    }
}
