//! Display-side filtering and sorting of expense lists.
//!
//! These functions work on slices and return new vectors, so sorting a view
//! never changes the order of the store it came from.

use std::cmp::Ordering;

use crate::expense::Expense;

/// The category filter value that matches every expense.
pub const ALL_CATEGORIES: &str = "All";

/// Which expenses to show in a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Show every expense.
    All,
    /// Show expenses in one category, compared without regard to case.
    Only(String),
}

impl From<&str> for CategoryFilter {
    fn from(category: &str) -> Self {
        if category == ALL_CATEGORIES {
            Self::All
        } else {
            Self::Only(category.to_owned())
        }
    }
}

/// The expenses in `expenses` that pass `filter`.
pub fn filter_by_category(expenses: &[Expense], filter: &CategoryFilter) -> Vec<Expense> {
    match filter {
        CategoryFilter::All => expenses.to_vec(),
        CategoryFilter::Only(category) => {
            let category = category.to_lowercase();

            expenses
                .iter()
                .filter(|expense| expense.category.to_lowercase() == category)
                .cloned()
                .collect()
        }
    }
}

/// The order to show expenses in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Most recent date first.
    Newest,
    /// Oldest date first.
    Oldest,
    /// Largest amount first.
    Highest,
    /// Smallest amount first.
    Lowest,
}

impl SortOrder {
    /// Parse the lowercase key used by list screens, e.g. "newest".
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "newest" => Some(Self::Newest),
            "oldest" => Some(Self::Oldest),
            "highest" => Some(Self::Highest),
            "lowest" => Some(Self::Lowest),
            _ => None,
        }
    }

    /// The key that [SortOrder::from_key] parses.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
            Self::Highest => "highest",
            Self::Lowest => "lowest",
        }
    }

    fn compare(&self, a: &Expense, b: &Expense) -> Ordering {
        match self {
            Self::Newest => b.date.cmp(&a.date),
            Self::Oldest => a.date.cmp(&b.date),
            Self::Highest => b.amount.total_cmp(&a.amount),
            Self::Lowest => a.amount.total_cmp(&b.amount),
        }
    }
}

/// A copy of `expenses` sorted by `order`.
///
/// The sort is stable: expenses that compare equal keep their relative order.
pub fn sort_expenses(expenses: &[Expense], order: SortOrder) -> Vec<Expense> {
    let mut sorted = expenses.to_vec();
    sorted.sort_by(|a, b| order.compare(a, b));
    sorted
}

/// A copy of `expenses` sorted by the order named by `key`.
///
/// An unrecognised key returns the expenses in their original order.
pub fn sort_expenses_by_key(expenses: &[Expense], key: &str) -> Vec<Expense> {
    match SortOrder::from_key(key) {
        Some(order) => sort_expenses(expenses, order),
        None => expenses.to_vec(),
    }
}

/// The sum of the amounts of `expenses`.
pub fn total_amount(expenses: &[Expense]) -> f64 {
    expenses.iter().map(|expense| expense.amount).sum()
}
