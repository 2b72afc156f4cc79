use thiserror::Error;

use crate::domain::BudgetMonthKey;

/// Reasons a mutation is refused. The store turns each of these into a no-op.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ServiceError {
    #[error("No budget month is selected")]
    NoSelectedMonth,
    #[error("Budget month not found: {0}")]
    MonthNotFound(String),
    #[error("Budget month already exists: {0}")]
    MonthExists(BudgetMonthKey),
    #[error("Budget month {0} is the last one and cannot be removed")]
    LastMonth(BudgetMonthKey),
    #[error("Invalid month {month} for year {year}")]
    InvalidMonth { year: i32, month: u32 },
    #[error("Category not found: {0}")]
    CategoryNotFound(String),
    #[error("Sub-category not found: {0}")]
    SubCategoryNotFound(String),
    #[error("Name must not be empty")]
    EmptyName,
    #[error("`{0}` already exists in this category")]
    DuplicateName(String),
    #[error("Category {0} must keep at least one sub-category")]
    LastSubCategory(String),
    #[error("Budget key does not address the selected month: {0}")]
    UnknownBudgetKey(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
