pub mod calendar_service;
pub mod category_service;
pub mod expense_service;
pub mod month_service;
pub mod summary_service;

pub use calendar_service::{CalendarService, MonthScope};
pub use category_service::CategoryService;
pub use expense_service::{ExpenseService, Spender};
pub use month_service::MonthService;
pub use summary_service::SummaryService;

pub use crate::core::errors::{ServiceError, ServiceResult};
