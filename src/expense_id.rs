//! Expense ID type definition.

/// Alias for the integer type used to identify expenses in a store.
pub type ExpenseId = u64;
