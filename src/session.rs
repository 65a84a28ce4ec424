//! Session store
//!
//! Owns the single signed-in [`Session`] (or its absence) and arbitrates
//! every identity change. There is no backend: sign-in accepts any non-empty
//! credentials after a simulated round trip, and nothing is persisted.
//!
//! ```text
//! Unauthenticated --login/register--> Authenticated --logout--> Unauthenticated
//! ```

use std::time::Duration;
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::{Plan, ProfileUpdate, Session};

/// Simulated round trip for sign-in, registration and password reset
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(1000);

/// Simulated payment processing time for plan changes
pub const DEFAULT_PAYMENT_DELAY: Duration = Duration::from_millis(2000);

/// In-memory holder of the current session
#[derive(Debug)]
pub struct SessionStore {
    current: Option<Session>,
    initialized: bool,
    latency: Duration,
    payment_delay: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::with_latency(DEFAULT_LATENCY)
    }

    /// Store with a custom simulated latency (zero in tests)
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            current: None,
            initialized: false,
            latency,
            payment_delay: DEFAULT_PAYMENT_DELAY,
        }
    }

    pub fn with_payment_delay(mut self, delay: Duration) -> Self {
        self.payment_delay = delay;
        self
    }

    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    /// True until [`initialize`](Self::initialize) has completed
    pub fn is_loading(&self) -> bool {
        !self.initialized
    }

    /// Watch history of the current session, empty when signed out
    pub fn watch_history(&self) -> &[String] {
        self.current
            .as_ref()
            .map(|s| s.watch_history.as_slice())
            .unwrap_or(&[])
    }

    async fn simulate_network(&self) {
        tokio::time::sleep(self.latency).await;
    }

    /// Startup check for a previously stored session.
    ///
    /// No credentials are ever stored, so this resolves to `None` after the
    /// simulated latency. Only the first call waits.
    pub async fn initialize(&mut self) -> Option<&Session> {
        if !self.initialized {
            self.simulate_network().await;
            self.initialized = true;
            debug!("session store initialized, no stored session");
        }
        self.current.as_ref()
    }

    /// Sign in. Succeeds for any non-empty email and password.
    ///
    /// The display name is the part of the email before the first `@`.
    pub async fn login(&mut self, email: &str, password: &str) -> bool {
        self.simulate_network().await;

        if email.is_empty() || password.is_empty() {
            debug!("login rejected: missing email or password");
            return false;
        }

        let name = email.split('@').next().unwrap_or_default();
        let session = Session::new(login_id(email), email, name);
        info!(user = %session.id, "signed in");
        self.current = Some(session);
        true
    }

    /// Create an account and sign in. Succeeds when all fields are non-empty.
    pub async fn register(&mut self, email: &str, password: &str, name: &str) -> bool {
        self.simulate_network().await;

        if email.is_empty() || password.is_empty() || name.is_empty() {
            debug!("registration rejected: missing field");
            return false;
        }

        let session = Session::new(Uuid::new_v4(), email, name);
        info!(user = %session.id, "registered");
        self.current = Some(session);
        true
    }

    pub fn logout(&mut self) {
        if let Some(session) = self.current.take() {
            info!(user = %session.id, "signed out");
        }
    }

    /// Request a password reset email. Nothing is sent; non-empty input succeeds.
    pub async fn reset_password(&mut self, email: &str) -> bool {
        self.simulate_network().await;
        !email.is_empty()
    }

    /// Merge `update` into the current session. No-op when signed out or
    /// when the update carries no fields.
    pub fn update_profile(&mut self, update: ProfileUpdate) {
        if update.is_empty() {
            return;
        }
        match self.current.as_mut() {
            Some(session) => {
                update.apply(session);
                debug!(user = %session.id, "profile updated");
            }
            None => debug!("profile update ignored: no session"),
        }
    }

    /// Prepend `item_id` to the watch history, keeping the newest 50.
    ///
    /// Items already in the history are left where they are.
    pub fn add_to_watch_history(&mut self, item_id: &str) {
        if let Some(session) = self.current.as_mut() {
            if session.record_watch(item_id) {
                debug!(item = item_id, "added to watch history");
            }
        }
    }

    /// Switch the current session to `plan` after a simulated payment.
    ///
    /// Returns false when nobody is signed in.
    pub async fn subscribe(&mut self, plan: Plan) -> bool {
        if self.current.is_none() {
            debug!(%plan, "subscription rejected: no session");
            return false;
        }

        tokio::time::sleep(self.payment_delay).await;
        self.update_profile(ProfileUpdate::plan(plan));
        info!(%plan, "subscription updated");
        true
    }
}

/// Stable id for a sign-in email, so repeated logins map to the same user
fn login_id(email: &str) -> Uuid {
    Uuid::new_v5(&Uuid::NAMESPACE_URL, format!("mailto:{}", email).as_bytes())
}
