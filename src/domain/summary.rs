//! Derived budget-versus-spend figures. Recomputed on demand, never persisted.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::amount::round_to_cents;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetTotals {
    pub budgeted: f64,
    pub spent_mine: f64,
    pub spent_other: f64,
    pub spent: f64,
    pub remaining: f64,
    /// `min(100, spent / budgeted * 100)`; zero when nothing is budgeted.
    pub percent_used: f64,
    pub status: BudgetStatus,
}

impl BudgetTotals {
    pub fn from_parts(budgeted: f64, spent_mine: f64, spent_other: f64) -> Self {
        let spent = spent_mine + spent_other;
        let remaining = budgeted - spent;
        let percent_used = if budgeted > f64::EPSILON {
            (spent / budgeted * 100.0).min(100.0)
        } else {
            0.0
        };
        let status = if budgeted.abs() < f64::EPSILON && spent.abs() < f64::EPSILON {
            BudgetStatus::Empty
        } else {
            match round_to_cents(spent)
                .partial_cmp(&round_to_cents(budgeted))
                .unwrap_or(Ordering::Equal)
            {
                Ordering::Greater => BudgetStatus::OverBudget,
                Ordering::Less => BudgetStatus::UnderBudget,
                Ordering::Equal => BudgetStatus::OnTrack,
            }
        };
        Self {
            budgeted,
            spent_mine,
            spent_other,
            spent,
            remaining,
            percent_used,
            status,
        }
    }

    pub fn is_over_budget(&self) -> bool {
        self.status == BudgetStatus::OverBudget
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BudgetStatus {
    OnTrack,
    UnderBudget,
    OverBudget,
    Empty,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryTotals {
    pub category_id: String,
    pub name: String,
    pub totals: BudgetTotals,
}
