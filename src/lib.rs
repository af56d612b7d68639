//! Expense tracking core.
//!
//! This library keeps a small set of expenses in memory and provides the pure
//! functions used to display them:
//! - [ExpenseStore] owns the expenses and supports create, read, update,
//!   delete, two queries and summary statistics.
//! - [ExpenseService] wraps the store in async calls that wait for a
//!   configurable [Latency], mimicking a remote API.
//! - [formatting] turns amounts, dates and text into display strings.
//! - [Session] is a mock sign-in state with a fixed user.
//!
//! Nothing is persisted. Dropping a store drops its expenses.

#![warn(missing_docs)]

mod clock;
mod config;
mod expense;
mod expense_id;
pub mod formatting;
mod service;
mod session;
pub mod timezone;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::Latency;
pub use expense::{
    ALL_CATEGORIES, CategoryFilter, CategoryTotals, Expense, ExpenseBuilder, ExpensePatch,
    ExpenseStats, ExpenseStore, SortOrder, compute_stats, filter_by_category, sort_expenses,
    sort_expenses_by_key, total_amount,
};
pub use expense_id::ExpenseId;
pub use service::ExpenseService;
pub use session::{Session, User};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// No expense in the store has the given ID.
    ///
    /// Update and delete return this instead of silently doing nothing, so
    /// the caller can decide whether to tell the user.
    #[error("expense {0} could not be found")]
    NotFound(ExpenseId),

    /// Text could not be parsed as a date.
    ///
    /// The formatting functions never return this error, they render
    /// [formatting::INVALID_DATE] instead.
    #[error("could not parse \"{0}\" as a date, expected YYYY-MM-DD or RFC 3339")]
    InvalidDate(String),

    /// The name is not a known IANA timezone.
    #[error("invalid timezone {0}")]
    InvalidTimezone(String),
}
