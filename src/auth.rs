//! Mock authentication.
//!
//! Stands in for a hosted auth provider: registration and login always
//! succeed and produce generated user ids. The notifier delivers auth-state
//! changes to subscribers, starting from signed-out, matching the behavior
//! the app shell expects while real authentication stays out of scope.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::events::{EventSource, Subscription};
use crate::storage::local::DEMO_USER_ID;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub uid: String,
    pub email: String,
    pub display_name: Option<String>,
}

impl AuthUser {
    /// Name shown in the UI; falls back to the email address.
    pub fn display_or_email(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.email)
    }
}

/// The shared anonymous trial identity.
pub fn demo_user() -> AuthUser {
    AuthUser {
        uid: DEMO_USER_ID.to_string(),
        email: "demo@example.com".to_string(),
        display_name: Some("Demo User".to_string()),
    }
}

pub fn register_user(email: &str, _password: &str) -> AuthUser {
    AuthUser {
        uid: format!("registered-{}", Uuid::new_v4().simple()),
        email: email.to_string(),
        display_name: Some(email.to_string()),
    }
}

pub fn login_user(email: &str, _password: &str) -> AuthUser {
    AuthUser {
        uid: format!("loggedin-{}", Uuid::new_v4().simple()),
        email: email.to_string(),
        display_name: Some(email.to_string()),
    }
}

/// Ends the session and broadcasts the signed-out state. Always succeeds;
/// clearing cached progress is the caller's decision.
pub fn logout_user(notifier: &AuthNotifier) {
    log::info!("user logged out");
    notifier.notify_signed_out();
}

/// Auth-state event source. `None` means signed out.
#[derive(Clone, Default)]
pub struct AuthNotifier {
    events: EventSource<Option<AuthUser>>,
}

impl AuthNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes to auth-state changes. The current state is assumed signed
    /// out until a sign-in lands, so `None` is delivered immediately.
    pub fn subscribe(&self, callback: impl Fn(Option<&AuthUser>) + Send + 'static) -> Subscription {
        callback(None);
        self.events.subscribe(move |state| callback(state.as_ref()))
    }

    pub fn notify_signed_in(&self, user: &AuthUser) {
        self.events.emit(&Some(user.clone()));
    }

    pub fn notify_signed_out(&self) {
        log::debug!("auth state cleared");
        self.events.emit(&None);
    }
}
