//! A mock authentication session.
//!
//! There is no credential check: every log in succeeds as the same fixed
//! user. The session exists so callers can exercise signed-in and
//! signed-out states.

use serde::Serialize;

use crate::config::{Latency, simulate_latency};

/// The ID of the fixed mock user.
pub const MOCK_USER_ID: &str = "123";

/// The email of the fixed mock user when restored without logging in.
pub const MOCK_USER_EMAIL: &str = "user@example.com";

/// The display name of the fixed mock user.
pub const MOCK_USER_NAME: &str = "Test User";

/// A signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    /// The user's ID.
    pub id: String,
    /// The email the user signed in with.
    pub email: String,
    /// The user's display name.
    pub name: String,
}

impl User {
    fn mock(email: &str) -> Self {
        Self {
            id: MOCK_USER_ID.to_owned(),
            email: email.to_owned(),
            name: MOCK_USER_NAME.to_owned(),
        }
    }
}

/// Tracks whether a user is signed in.
#[derive(Debug, Clone)]
pub struct Session {
    user: Option<User>,
    latency: Latency,
}

impl Session {
    /// Create a signed-out session.
    pub fn new(latency: Latency) -> Self {
        Self {
            user: None,
            latency,
        }
    }

    /// The signed-in user, if any.
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Whether a user is signed in.
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Restore a previous session, which always yields the mock user.
    pub async fn restore(&mut self) -> &User {
        simulate_latency(self.latency.auth_check).await;
        self.sign_in(MOCK_USER_EMAIL)
    }

    /// Sign in as the mock user with `email`. The password is ignored.
    pub async fn log_in(&mut self, email: &str, _password: &str) -> &User {
        simulate_latency(self.latency.log_in).await;
        self.sign_in(email)
    }

    /// Sign out the current user, if any.
    pub async fn log_out(&mut self) {
        simulate_latency(self.latency.log_out).await;

        if let Some(user) = self.user.take() {
            tracing::debug!("Signed out {}", user.email);
        }
    }

    fn sign_in(&mut self, email: &str) -> &User {
        tracing::debug!("Signed in as {email}");
        self.user.insert(User::mock(email))
    }
}
