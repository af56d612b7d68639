//! An asynchronous façade over [ExpenseStore] that behaves like a slow
//! remote API.

use std::ops::RangeInclusive;

use time::OffsetDateTime;

use crate::{
    Error,
    clock::{Clock, SystemClock},
    config::{Latency, simulate_latency},
    expense::{Expense, ExpenseBuilder, ExpensePatch, ExpenseStats, ExpenseStore},
    expense_id::ExpenseId,
};

/// Mock expense API.
///
/// Each call waits for the matching [Latency] before touching the store.
/// Calls that change the store take `&mut self`, so a caller can only have
/// one of them in flight at a time.
#[derive(Debug, Clone)]
pub struct ExpenseService<C = SystemClock> {
    store: ExpenseStore<C>,
    latency: Latency,
}

impl ExpenseService<SystemClock> {
    /// Create a service over a freshly seeded store.
    pub fn new(latency: Latency) -> Self {
        Self::with_store(ExpenseStore::new(), latency)
    }
}

impl<C: Clock> ExpenseService<C> {
    /// Create a service over `store`.
    pub fn with_store(store: ExpenseStore<C>, latency: Latency) -> Self {
        Self { store, latency }
    }

    /// The underlying store.
    pub fn store(&self) -> &ExpenseStore<C> {
        &self.store
    }

    /// Fetch every expense.
    pub async fn get_expenses(&self) -> Vec<Expense> {
        simulate_latency(self.latency.list).await;
        self.store.list()
    }

    /// Create a new expense. See [ExpenseStore::create].
    pub async fn create_expense(&mut self, builder: ExpenseBuilder) -> Expense {
        simulate_latency(self.latency.create).await;
        self.store.create(builder)
    }

    /// Update an existing expense. See [ExpenseStore::update].
    ///
    /// # Errors
    /// Returns [Error::NotFound] if no expense has the ID `id`.
    pub async fn update_expense(
        &mut self,
        id: ExpenseId,
        patch: ExpensePatch,
    ) -> Result<Expense, Error> {
        simulate_latency(self.latency.update).await;
        self.store.update(id, patch)
    }

    /// Delete an expense. See [ExpenseStore::delete].
    ///
    /// # Errors
    /// Returns [Error::NotFound] if no expense has the ID `id`.
    pub async fn delete_expense(&mut self, id: ExpenseId) -> Result<(), Error> {
        simulate_latency(self.latency.delete).await;
        self.store.delete(id)
    }

    /// Fetch the expenses in `category`, ignoring case.
    pub async fn get_expenses_by_category(&self, category: &str) -> Vec<Expense> {
        simulate_latency(self.latency.query).await;
        self.store.find_by_category(category)
    }

    /// Fetch the expenses dated within `date_range` (inclusive).
    pub async fn get_expenses_by_date_range(
        &self,
        date_range: RangeInclusive<OffsetDateTime>,
    ) -> Vec<Expense> {
        simulate_latency(self.latency.query).await;
        self.store.find_by_date_range(date_range)
    }

    /// Compute statistics over every expense.
    pub async fn get_expense_stats(&self) -> ExpenseStats {
        simulate_latency(self.latency.stats).await;
        self.store.stats()
    }

    /// Restore the seed expenses. Completes immediately.
    pub fn reset_mock_data(&mut self) {
        self.store.reset();
    }
}
