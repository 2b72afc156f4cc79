pub mod errors;
pub mod ids;
pub mod services;
pub mod store_manager;
pub mod time;

pub use store_manager::{BudgetStore, StoreOptions, Subscriber};
