//! Defines the expense model and the types used to create and update expenses.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::expense_id::ExpenseId;

// ============================================================================
// MODELS
// ============================================================================

/// A single tracked expense.
///
/// To create a new `Expense`, use [Expense::build] and pass the builder to
/// [ExpenseStore::create](crate::ExpenseStore::create).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// The ID of the expense, unique within its store.
    pub id: ExpenseId,
    /// A short label for the expense, e.g. "Coffee".
    pub title: String,
    /// How much was spent. No currency is attached to the amount.
    pub amount: f64,
    /// A free-form grouping label, e.g. "Food & Drink".
    pub category: String,
    /// Longer free-form notes about the expense.
    pub description: String,
    /// When the expense happened.
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
}

impl Expense {
    /// Create a new expense.
    ///
    /// Shortcut for [ExpenseBuilder] for discoverability.
    pub fn build(title: &str, amount: f64, category: &str) -> ExpenseBuilder {
        ExpenseBuilder {
            title: title.to_owned(),
            amount,
            category: category.to_owned(),
            description: String::new(),
            date: None,
        }
    }
}

/// A builder for new [Expense] instances.
///
/// The store assigns the ID. If no date is set, the store uses the current
/// time from its [Clock](crate::Clock).
///
/// # Examples
///
/// ```
/// use expense_tracker::{Expense, ExpenseStore};
/// use time::macros::datetime;
///
/// let mut store = ExpenseStore::new();
/// let expense = store.create(
///     Expense::build("Groceries", 82.40, "Food & Drink")
///         .description("Weekly shop")
///         .date(datetime!(2023-12-03 09:30 UTC)),
/// );
///
/// assert_eq!(expense.title, "Groceries");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseBuilder {
    /// A short label for the expense.
    pub title: String,
    /// How much was spent.
    pub amount: f64,
    /// A free-form grouping label.
    pub category: String,
    /// Longer free-form notes. Defaults to an empty string.
    pub description: String,
    /// When the expense happened. `None` means "now".
    pub date: Option<OffsetDateTime>,
}

impl ExpenseBuilder {
    /// Set the description for the expense.
    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_owned();
        self
    }

    /// Set the date for the expense.
    pub fn date(mut self, date: OffsetDateTime) -> Self {
        self.date = Some(date);
        self
    }

    pub(crate) fn finalize(self, id: ExpenseId, now: OffsetDateTime) -> Expense {
        Expense {
            id,
            title: self.title,
            amount: self.amount,
            category: self.category,
            description: self.description,
            date: self.date.unwrap_or(now),
        }
    }
}

/// A partial update to an existing [Expense].
///
/// Fields set to `Some` replace the stored value, fields left as `None` keep
/// the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpensePatch {
    /// The new title.
    pub title: Option<String>,
    /// The new amount.
    pub amount: Option<f64>,
    /// The new category.
    pub category: Option<String>,
    /// The new description.
    pub description: Option<String>,
    /// The new date.
    pub date: Option<OffsetDateTime>,
}

impl ExpensePatch {
    /// A patch that changes nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// A patch that sets every field to the values in `expense`.
    pub fn from_expense(expense: &Expense) -> Self {
        Self {
            title: Some(expense.title.clone()),
            amount: Some(expense.amount),
            category: Some(expense.category.clone()),
            description: Some(expense.description.clone()),
            date: Some(expense.date),
        }
    }

    /// Set the new title.
    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_owned());
        self
    }

    /// Set the new amount.
    pub fn amount(mut self, amount: f64) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Set the new category.
    pub fn category(mut self, category: &str) -> Self {
        self.category = Some(category.to_owned());
        self
    }

    /// Set the new description.
    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_owned());
        self
    }

    /// Set the new date.
    pub fn date(mut self, date: OffsetDateTime) -> Self {
        self.date = Some(date);
        self
    }

    /// Whether the patch would leave an expense unchanged.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub(crate) fn apply(self, expense: &mut Expense) {
        if let Some(title) = self.title {
            expense.title = title;
        }

        if let Some(amount) = self.amount {
            expense.amount = amount;
        }

        if let Some(category) = self.category {
            expense.category = category;
        }

        if let Some(description) = self.description {
            expense.description = description;
        }

        if let Some(date) = self.date {
            expense.date = date;
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
