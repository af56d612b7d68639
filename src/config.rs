//! Runtime configuration for the simulated backend.

use std::time::Duration;

/// How long each simulated backend call waits before completing.
///
/// The mock backend mimics API latency so callers exercise their loading
/// states. Use [Latency::none] in tests and [Latency::simulated] for demos.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latency {
    /// Delay before listing all expenses.
    pub list: Duration,
    /// Delay before creating an expense.
    pub create: Duration,
    /// Delay before updating an expense.
    pub update: Duration,
    /// Delay before deleting an expense.
    pub delete: Duration,
    /// Delay before the category and date range queries.
    pub query: Duration,
    /// Delay before computing statistics.
    pub stats: Duration,
    /// Delay before restoring a session.
    pub auth_check: Duration,
    /// Delay before logging in.
    pub log_in: Duration,
    /// Delay before logging out.
    pub log_out: Duration,
}

impl Latency {
    /// Complete every call immediately.
    pub const fn none() -> Self {
        Self {
            list: Duration::ZERO,
            create: Duration::ZERO,
            update: Duration::ZERO,
            delete: Duration::ZERO,
            query: Duration::ZERO,
            stats: Duration::ZERO,
            auth_check: Duration::ZERO,
            log_in: Duration::ZERO,
            log_out: Duration::ZERO,
        }
    }

    /// Delays that resemble a slow mobile network.
    pub const fn simulated() -> Self {
        Self {
            list: Duration::from_millis(500),
            create: Duration::from_millis(300),
            update: Duration::from_millis(300),
            delete: Duration::from_millis(200),
            query: Duration::from_millis(400),
            stats: Duration::from_millis(600),
            auth_check: Duration::from_millis(1000),
            log_in: Duration::from_millis(500),
            log_out: Duration::from_millis(300),
        }
    }
}

impl Default for Latency {
    fn default() -> Self {
        Self::simulated()
    }
}

/// Wait for `delay`, returning immediately for a zero delay.
pub(crate) async fn simulate_latency(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
