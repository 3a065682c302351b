use std::collections::HashMap;
use std::sync::{Arc, Mutex, Weak};

use roadmap_core::model::Credentials;

use crate::backend::{AuthBackend, AuthSession};
use crate::error::AuthError;

//
// ─── EVENTS ────────────────────────────────────────────────────────────────────
//

/// Session state change notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn(AuthSession),
    SignedOut,
}

type Callback = Arc<dyn Fn(&AuthEvent) + Send + Sync>;

#[derive(Default)]
struct Subscribers {
    next_id: u64,
    callbacks: HashMap<u64, Callback>,
}

/// Registration guard returned by [`AuthService::subscribe`].
///
/// Dropping the guard unsubscribes; no callback is invoked afterwards.
pub struct AuthSubscription {
    id: u64,
    subscribers: Weak<Mutex<Subscribers>>,
}

impl Drop for AuthSubscription {
    fn drop(&mut self) {
        if let Some(subscribers) = self.subscribers.upgrade() {
            subscribers
                .lock()
                .expect("subscribers lock")
                .callbacks
                .remove(&self.id);
        }
    }
}

//
// ─── SERVICE ───────────────────────────────────────────────────────────────────
//

/// Wraps the auth backend with session state and change notifications.
pub struct AuthService {
    backend: Arc<dyn AuthBackend>,
    session: Mutex<Option<AuthSession>>,
    subscribers: Arc<Mutex<Subscribers>>,
}

impl AuthService {
    #[must_use]
    pub fn new(backend: Arc<dyn AuthBackend>) -> Self {
        Self {
            backend,
            session: Mutex::new(None),
            subscribers: Arc::new(Mutex::new(Subscribers::default())),
        }
    }

    /// Sign in with validated credentials.
    ///
    /// On success the session is stored and subscribers receive
    /// `AuthEvent::SignedIn`.
    ///
    /// # Errors
    ///
    /// Returns the backend's classified `AuthError`.
    pub async fn sign_in(&self, credentials: &Credentials) -> Result<AuthSession, AuthError> {
        let session = self.backend.sign_in(credentials).await?;
        self.install_session(session.clone());
        Ok(session)
    }

    /// Register a new account and sign it in.
    ///
    /// # Errors
    ///
    /// Returns the backend's classified `AuthError`, notably
    /// `AuthError::AlreadyRegistered` for duplicate emails.
    pub async fn sign_up(&self, credentials: &Credentials) -> Result<AuthSession, AuthError> {
        let session = self.backend.sign_up(credentials).await?;
        self.install_session(session.clone());
        Ok(session)
    }

    /// Drop the current session and notify subscribers.
    pub fn sign_out(&self) {
        let had_session = self
            .session
            .lock()
            .expect("session lock")
            .take()
            .is_some();
        if had_session {
            self.notify(&AuthEvent::SignedOut);
        }
    }

    #[must_use]
    pub fn current_session(&self) -> Option<AuthSession> {
        self.session.lock().expect("session lock").clone()
    }

    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        self.session.lock().expect("session lock").is_some()
    }

    /// Register a session-change callback.
    ///
    /// The returned guard must be kept alive for as long as notifications
    /// are wanted; dropping it unsubscribes.
    #[must_use]
    pub fn subscribe(
        &self,
        callback: impl Fn(&AuthEvent) + Send + Sync + 'static,
    ) -> AuthSubscription {
        let mut subscribers = self.subscribers.lock().expect("subscribers lock");
        let id = subscribers.next_id;
        subscribers.next_id += 1;
        subscribers.callbacks.insert(id, Arc::new(callback));
        AuthSubscription {
            id,
            subscribers: Arc::downgrade(&self.subscribers),
        }
    }

    fn install_session(&self, session: AuthSession) {
        *self.session.lock().expect("session lock") = Some(session.clone());
        self.notify(&AuthEvent::SignedIn(session));
    }

    fn notify(&self, event: &AuthEvent) {
        // Clone the callbacks out first so a callback may subscribe or
        // unsubscribe without deadlocking.
        let callbacks: Vec<Callback> = self
            .subscribers
            .lock()
            .expect("subscribers lock")
            .callbacks
            .values()
            .cloned()
            .collect();
        for callback in callbacks {
            callback(event);
        }
    }
}
