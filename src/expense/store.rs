//! The in-memory expense store.

use std::ops::RangeInclusive;

use time::{OffsetDateTime, macros::datetime};

use crate::{
    Error,
    clock::{Clock, SystemClock},
    expense::{Expense, ExpenseBuilder, ExpensePatch, ExpenseStats, compute_stats},
    expense_id::ExpenseId,
};

/// Owns the authoritative list of expenses.
///
/// Expenses are kept in insertion order and every lookup is a linear scan.
/// Mutating methods take `&mut self`, so there is exactly one writer at a
/// time and the store does no locking of its own.
///
/// A new store starts with the same three seed expenses that [reset](ExpenseStore::reset)
/// restores.
#[derive(Debug, Clone)]
pub struct ExpenseStore<C = SystemClock> {
    expenses: Vec<Expense>,
    next_id: ExpenseId,
    clock: C,
}

impl ExpenseStore<SystemClock> {
    /// Create a seeded store that reads the system clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for ExpenseStore<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> ExpenseStore<C> {
    /// Create a seeded store that uses `clock` to date new expenses.
    pub fn with_clock(clock: C) -> Self {
        let expenses = seed_expenses();
        let next_id = first_free_id(&expenses);

        Self {
            expenses,
            next_id,
            clock,
        }
    }

    /// A copy of every expense in store order.
    pub fn list(&self) -> Vec<Expense> {
        self.expenses.clone()
    }

    /// The number of expenses in the store.
    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    /// Whether the store has no expenses.
    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    /// Retrieve an expense by its `id`.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if no expense has the ID `id`.
    pub fn get(&self, id: ExpenseId) -> Result<Expense, Error> {
        self.expenses
            .iter()
            .find(|expense| expense.id == id)
            .cloned()
            .ok_or(Error::NotFound(id))
    }

    /// Add a new expense to the end of the store.
    ///
    /// The expense gets a fresh ID and, if the builder has no date, the
    /// current time. The builder's fields are not validated.
    pub fn create(&mut self, builder: ExpenseBuilder) -> Expense {
        let id = self.next_id;
        self.next_id += 1;

        let expense = builder.finalize(id, self.clock.now());
        tracing::debug!("Created expense {id} ({:?})", expense.title);
        self.expenses.push(expense.clone());

        expense
    }

    /// Apply `patch` to the expense with the ID `id` and return the result.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if no expense has the ID `id`.
    pub fn update(&mut self, id: ExpenseId, patch: ExpensePatch) -> Result<Expense, Error> {
        let Some(expense) = self.expenses.iter_mut().find(|expense| expense.id == id) else {
            tracing::warn!("Tried to update expense {id}, which does not exist");
            return Err(Error::NotFound(id));
        };

        patch.apply(expense);
        tracing::debug!("Updated expense {id}");

        Ok(expense.clone())
    }

    /// Remove the expense with the ID `id`.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if no expense has the ID `id`.
    pub fn delete(&mut self, id: ExpenseId) -> Result<(), Error> {
        let Some(index) = self.expenses.iter().position(|expense| expense.id == id) else {
            tracing::warn!("Tried to delete expense {id}, which does not exist");
            return Err(Error::NotFound(id));
        };

        self.expenses.remove(index);
        tracing::debug!("Deleted expense {id}");

        Ok(())
    }

    /// The expenses whose category matches `category`, ignoring case.
    pub fn find_by_category(&self, category: &str) -> Vec<Expense> {
        let category = category.to_lowercase();

        self.expenses
            .iter()
            .filter(|expense| expense.category.to_lowercase() == category)
            .cloned()
            .collect()
    }

    /// The expenses dated within `date_range` (inclusive).
    pub fn find_by_date_range(&self, date_range: RangeInclusive<OffsetDateTime>) -> Vec<Expense> {
        self.expenses
            .iter()
            .filter(|expense| date_range.contains(&expense.date))
            .cloned()
            .collect()
    }

    /// Count and totals over every expense in the store.
    pub fn stats(&self) -> ExpenseStats {
        compute_stats(&self.expenses)
    }

    /// Discard every expense and restore the seed expenses.
    ///
    /// Intended for isolating tests and demos from each other.
    pub fn reset(&mut self) {
        self.expenses = seed_expenses();
        self.next_id = first_free_id(&self.expenses);
        tracing::debug!("Reset expense store to {} seed expenses", self.expenses.len());
    }
}

fn first_free_id(expenses: &[Expense]) -> ExpenseId {
    expenses.iter().map(|expense| expense.id).max().unwrap_or(0) + 1
}

fn seed_expenses() -> Vec<Expense> {
    vec![
        Expense {
            id: 1,
            title: "Coffee".to_owned(),
            amount: 4.50,
            category: "Food & Drink".to_owned(),
            description: "Morning coffee at Starbucks".to_owned(),
            date: datetime!(2023-12-01 00:00 UTC),
        },
        Expense {
            id: 2,
            title: "Uber Ride".to_owned(),
            amount: 12.75,
            category: "Transportation".to_owned(),
            description: "Ride to the office".to_owned(),
            date: datetime!(2023-12-02 00:00 UTC),
        },
        Expense {
            id: 3,
            title: "Lunch".to_owned(),
            amount: 15.99,
            category: "Food & Drink".to_owned(),
            description: "Business lunch meeting".to_owned(),
            date: datetime!(2023-12-02 00:00 UTC),
        },
    ]
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use crate::{
        Error,
        clock::FixedClock,
        expense::{Expense, ExpensePatch, ExpenseStore},
    };

    fn get_test_store() -> ExpenseStore<FixedClock> {
        ExpenseStore::with_clock(FixedClock(datetime!(2023-12-25 12:00 UTC)))
    }

    fn ids(expenses: &[Expense]) -> Vec<u64> {
        expenses.iter().map(|expense| expense.id).collect()
    }

    #[test]
    fn new_store_is_seeded() {
        let store = get_test_store();

        let expenses = store.list();

        assert_eq!(ids(&expenses), vec![1, 2, 3]);
        assert_eq!(expenses[0].title, "Coffee");
        assert_eq!(expenses[1].category, "Transportation");
        assert_eq!(expenses[2].amount, 15.99);
    }

    #[test]
    fn list_returns_a_copy() {
        let mut store = get_test_store();
        let mut snapshot = store.list();

        snapshot.clear();
        store.delete(1).unwrap();

        assert_eq!(store.len(), 2);
        assert!(snapshot.is_empty());
    }

    #[test]
    fn create_appends_with_fresh_id() {
        let mut store = get_test_store();

        let expense = store.create(Expense::build("Taxi", 30.0, "Transportation"));

        assert_eq!(expense.id, 4);
        assert_eq!(store.list().last(), Some(&expense));
    }

    #[test]
    fn create_defaults_date_to_clock() {
        let mut store = get_test_store();

        let expense = store.create(Expense::build("Taxi", 30.0, "Transportation"));

        assert_eq!(expense.date, datetime!(2023-12-25 12:00 UTC));
    }

    #[test]
    fn create_keeps_given_date() {
        let mut store = get_test_store();
        let date = datetime!(2023-11-11 11:11 UTC);

        let expense = store.create(Expense::build("Taxi", 30.0, "Transportation").date(date));

        assert_eq!(expense.date, date);
    }

    #[test]
    fn create_stores_unvalidated_input() {
        let mut store = get_test_store();

        let expense = store.create(Expense::build("", f64::NAN, ""));

        assert!(store.get(expense.id).unwrap().amount.is_nan());
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let mut store = get_test_store();
        let first = store.create(Expense::build("A", 1.0, "Misc"));
        store.delete(first.id).unwrap();

        let second = store.create(Expense::build("B", 2.0, "Misc"));

        assert_ne!(first.id, second.id);
    }

    #[test]
    fn rapid_creates_get_unique_ids() {
        let mut store = get_test_store();

        let created: Vec<_> = (0..100)
            .map(|i| store.create(Expense::build("Item", i as f64, "Misc")).id)
            .collect();

        let mut deduped = created.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), created.len());
    }

    #[test]
    fn get_fails_on_missing_id() {
        let store = get_test_store();

        assert_eq!(store.get(42), Err(Error::NotFound(42)));
    }

    #[test]
    fn update_overrides_only_patched_fields() {
        let mut store = get_test_store();
        let before = store.get(2).unwrap();

        let updated = store
            .update(2, ExpensePatch::new().amount(20.0).description("Ride home"))
            .unwrap();

        assert_eq!(updated.amount, 20.0);
        assert_eq!(updated.description, "Ride home");
        assert_eq!(updated.title, before.title);
        assert_eq!(updated.category, before.category);
        assert_eq!(updated.date, before.date);
        assert_eq!(store.get(2), Ok(updated));
    }

    #[test]
    fn update_replaces_date_when_given() {
        let mut store = get_test_store();
        let date = datetime!(2023-12-10 08:00 UTC);

        let updated = store.update(1, ExpensePatch::new().date(date)).unwrap();

        assert_eq!(updated.date, date);
    }

    #[test]
    fn update_fails_on_missing_id() {
        let mut store = get_test_store();

        let result = store.update(99, ExpensePatch::new().title("Nope"));

        assert_eq!(result, Err(Error::NotFound(99)));
        assert_eq!(ids(&store.list()), vec![1, 2, 3]);
    }

    #[test]
    fn update_with_identical_patch_is_idempotent() {
        let mut store = get_test_store();
        let created = store.create(
            Expense::build("Gym", 45.0, "Health")
                .description("Monthly membership")
                .date(datetime!(2023-12-05 07:00 UTC)),
        );
        let patch = ExpensePatch::from_expense(&created);

        let first = store.update(created.id, patch.clone()).unwrap();
        let state_after_first = store.list();
        let second = store.update(created.id, patch).unwrap();

        assert_eq!(first, created);
        assert_eq!(second, first);
        assert_eq!(store.list(), state_after_first);
    }

    #[test]
    fn delete_removes_expense() {
        let mut store = get_test_store();

        store.delete(2).unwrap();

        assert_eq!(ids(&store.list()), vec![1, 3]);
    }

    #[test]
    fn delete_fails_on_missing_id() {
        let mut store = get_test_store();
        store.delete(2).unwrap();

        assert_eq!(store.delete(2), Err(Error::NotFound(2)));
    }

    #[test]
    fn find_by_category_ignores_case() {
        let store = get_test_store();

        let lower = store.find_by_category("food & drink");
        let upper = store.find_by_category("FOOD & DRINK");

        assert_eq!(ids(&lower), vec![1, 3]);
        assert_eq!(lower, upper);
    }

    #[test]
    fn find_by_category_requires_whole_match() {
        let store = get_test_store();

        assert!(store.find_by_category("Food").is_empty());
    }

    #[test]
    fn find_by_date_range_is_inclusive() {
        let store = get_test_store();

        let expenses = store.find_by_date_range(
            datetime!(2023-12-01 00:00 UTC)..=datetime!(2023-12-02 00:00 UTC),
        );

        assert_eq!(ids(&expenses), vec![1, 2, 3]);
    }

    #[test]
    fn find_by_date_range_excludes_outside_dates() {
        let store = get_test_store();

        let expenses = store.find_by_date_range(
            datetime!(2023-12-01 00:00:01 UTC)..=datetime!(2023-12-31 00:00 UTC),
        );

        assert_eq!(ids(&expenses), vec![2, 3]);
    }

    #[test]
    fn stats_average_is_total_over_count() {
        let store = get_test_store();

        let stats = store.stats();

        assert_eq!(stats.count, 3);
        assert_eq!(stats.average_amount, stats.total_amount / 3.0);
    }

    #[test]
    fn stats_average_is_zero_when_empty() {
        let mut store = get_test_store();
        for id in 1..=3 {
            store.delete(id).unwrap();
        }

        let stats = store.stats();

        assert!(store.is_empty());
        assert_eq!(stats.count, 0);
        assert_eq!(stats.total_amount, 0.0);
        assert_eq!(stats.average_amount, 0.0);
        assert!(stats.per_category.is_empty());
    }

    #[test]
    fn reset_restores_seed() {
        let mut store = get_test_store();
        store.create(Expense::build("Taxi", 30.0, "Transportation"));
        store.delete(1).unwrap();
        store.update(2, ExpensePatch::new().amount(0.0)).unwrap();

        store.reset();

        assert_eq!(store.list(), get_test_store().list());
        let next = store.create(Expense::build("Taxi", 30.0, "Transportation"));
        assert_eq!(next.id, 4);
    }
}
