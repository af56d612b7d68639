//! Expense management.
//!
//! This module contains everything related to expenses:
//! - The `Expense` model, `ExpenseBuilder` and `ExpensePatch`
//! - The in-memory `ExpenseStore` and its statistics
//! - Display-side filtering and sorting of expense lists

mod model;
mod stats;
mod store;
mod view;

pub use model::{Expense, ExpenseBuilder, ExpensePatch};
pub use stats::{CategoryTotals, ExpenseStats, compute_stats};
pub use store::ExpenseStore;
pub use view::{
    ALL_CATEGORIES, CategoryFilter, SortOrder, filter_by_category, sort_expenses,
    sort_expenses_by_key, total_amount,
};
