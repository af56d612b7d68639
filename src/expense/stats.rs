//! Aggregate statistics over a set of expenses.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::expense::Expense;

/// Count and totals for a set of expenses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseStats {
    /// The number of expenses.
    pub count: usize,
    /// The sum of every expense amount.
    pub total_amount: f64,
    /// `total_amount / count`, or zero when there are no expenses.
    pub average_amount: f64,
    /// Count and total for each category, keyed by the category text as stored.
    pub per_category: BTreeMap<String, CategoryTotals>,
}

/// The count and total of the expenses in one category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CategoryTotals {
    /// The number of expenses in the category.
    pub count: usize,
    /// The sum of the amounts in the category.
    pub total: f64,
}

/// Aggregate `expenses` into an [ExpenseStats].
pub fn compute_stats(expenses: &[Expense]) -> ExpenseStats {
    let mut total_amount = 0.0;
    let mut per_category: BTreeMap<String, CategoryTotals> = BTreeMap::new();

    for expense in expenses {
        total_amount += expense.amount;

        let totals = per_category.entry(expense.category.clone()).or_default();
        totals.count += 1;
        totals.total += expense.amount;
    }

    let count = expenses.len();
    let average_amount = if count == 0 {
        0.0
    } else {
        total_amount / count as f64
    };

    ExpenseStats {
        count,
        total_amount,
        average_amount,
        per_category,
    }
}
