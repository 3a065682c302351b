//! Backend adapters: the remote HTTP backend and an in-memory stand-in.
//!
//! All persistence lives behind these traits; the application core never
//! talks to the network directly.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use roadmap_core::Clock;
use roadmap_core::model::{Credentials, Roadmap, RoadmapId, UserProgress};

use crate::error::{AuthError, BackendError};

//
// ─── CONTRACTS ─────────────────────────────────────────────────────────────────
//

/// Read/write access to roadmap records.
#[async_trait]
pub trait RoadmapStore: Send + Sync {
    /// Fetch a roadmap by id; `None` when the record does not exist.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` on transport or server failures.
    async fn get_roadmap(&self, id: RoadmapId) -> Result<Option<Roadmap>, BackendError>;

    /// List up to `limit` roadmaps, newest first.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` on transport or server failures.
    async fn list_roadmaps(&self, limit: u32) -> Result<Vec<Roadmap>, BackendError>;

    /// Persist a roadmap record.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` if the record cannot be stored.
    async fn save_roadmap(&self, roadmap: &Roadmap) -> Result<(), BackendError>;
}

/// Read/write access to the current user's progress.
#[async_trait]
pub trait ProgressStore: Send + Sync {
    /// Load the current progress, creating an empty record when none exists.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` on transport or server failures.
    async fn load_progress(&self) -> Result<UserProgress, BackendError>;

    /// Persist the given progress.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` if the record cannot be stored.
    async fn store_progress(&self, progress: &UserProgress) -> Result<(), BackendError>;
}

/// Session returned by the auth collaborator on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub user_id: String,
    pub email: String,
    pub access_token: String,
}

/// The authentication collaborator.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// Exchange credentials for a session.
    ///
    /// # Errors
    ///
    /// Returns a classified `AuthError` on failure.
    async fn sign_in(&self, credentials: &Credentials) -> Result<AuthSession, AuthError>;

    /// Register a new account and return its session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::AlreadyRegistered` for duplicate emails, other
    /// classified `AuthError`s on failure.
    async fn sign_up(&self, credentials: &Credentials) -> Result<AuthSession, AuthError>;
}

//
// ─── HTTP BACKEND ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Serialize)]
struct AuthRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct AuthFailureBody {
    #[serde(default)]
    message: String,
}

/// Remote REST backend for roadmaps, progress, and authentication.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    async fn auth_request(
        &self,
        path: &str,
        credentials: &Credentials,
    ) -> Result<AuthSession, AuthError> {
        let payload = AuthRequest {
            email: credentials.email(),
            password: credentials.password(),
        };
        let response = self
            .client
            .post(self.endpoint(path))
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<AuthSession>().await?);
        }

        let body = response
            .json::<AuthFailureBody>()
            .await
            .unwrap_or(AuthFailureBody {
                message: String::new(),
            });
        Err(classify_auth_failure(status, &body.message))
    }
}

/// Map an auth HTTP failure onto an error category.
///
/// Mirrors the backend's convention: 400 covers bad credentials and
/// malformed requests (distinguished by message), 422 covers duplicate
/// registrations. Everything else is unexpected.
fn classify_auth_failure(status: StatusCode, message: &str) -> AuthError {
    match status {
        StatusCode::BAD_REQUEST => {
            if message.contains("Invalid login credentials") {
                AuthError::InvalidCredentials
            } else {
                AuthError::Malformed
            }
        }
        StatusCode::UNPROCESSABLE_ENTITY => {
            if message.contains("already registered") {
                AuthError::AlreadyRegistered
            } else {
                AuthError::Malformed
            }
        }
        _ => AuthError::Unexpected(format!("status {status}: {message}")),
    }
}

#[async_trait]
impl RoadmapStore for HttpBackend {
    async fn get_roadmap(&self, id: RoadmapId) -> Result<Option<Roadmap>, BackendError> {
        let response = self
            .client
            .get(self.endpoint(&format!("roadmaps/{id}")))
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(BackendError::HttpStatus(response.status()));
        }
        Ok(Some(response.json::<Roadmap>().await?))
    }

    async fn list_roadmaps(&self, limit: u32) -> Result<Vec<Roadmap>, BackendError> {
        let response = self
            .client
            .get(self.endpoint("roadmaps"))
            .query(&[("limit", limit)])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(BackendError::HttpStatus(response.status()));
        }
        Ok(response.json::<Vec<Roadmap>>().await?)
    }

    async fn save_roadmap(&self, roadmap: &Roadmap) -> Result<(), BackendError> {
        let response = self
            .client
            .post(self.endpoint("roadmaps"))
            .json(roadmap)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(BackendError::HttpStatus(response.status()));
        }
        Ok(())
    }
}

#[async_trait]
impl ProgressStore for HttpBackend {
    async fn load_progress(&self) -> Result<UserProgress, BackendError> {
        let response = self.client.get(self.endpoint("progress")).send().await?;
        if !response.status().is_success() {
            return Err(BackendError::HttpStatus(response.status()));
        }
        Ok(response.json::<UserProgress>().await?)
    }

    async fn store_progress(&self, progress: &UserProgress) -> Result<(), BackendError> {
        let response = self
            .client
            .put(self.endpoint("progress"))
            .json(progress)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(BackendError::HttpStatus(response.status()));
        }
        Ok(())
    }
}

#[async_trait]
impl AuthBackend for HttpBackend {
    async fn sign_in(&self, credentials: &Credentials) -> Result<AuthSession, AuthError> {
        self.auth_request("auth/sign-in", credentials).await
    }

    async fn sign_up(&self, credentials: &Credentials) -> Result<AuthSession, AuthError> {
        self.auth_request("auth/sign-up", credentials).await
    }
}

//
// ─── MEMORY BACKEND ────────────────────────────────────────────────────────────
//

/// In-memory backend for demo mode and tests.
///
/// Implements all three backend contracts with plain maps. Locks are never
/// held across await points.
pub struct MemoryBackend {
    clock: Clock,
    roadmaps: Mutex<Vec<Roadmap>>,
    progress: Mutex<Option<UserProgress>>,
    accounts: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    #[must_use]
    pub fn new(clock: Clock) -> Self {
        Self {
            clock,
            roadmaps: Mutex::new(Vec::new()),
            progress: Mutex::new(None),
            accounts: Mutex::new(HashMap::new()),
        }
    }

    /// Pre-register an account (demo/test convenience).
    pub fn seed_account(&self, email: &str, password: &str) {
        self.accounts
            .lock()
            .expect("accounts lock")
            .insert(email.to_ascii_lowercase(), password.to_string());
    }

    fn session_for(email: &str) -> AuthSession {
        AuthSession {
            user_id: format!("local-{email}"),
            email: email.to_string(),
            access_token: "local-session".to_string(),
        }
    }
}

#[async_trait]
impl RoadmapStore for MemoryBackend {
    async fn get_roadmap(&self, id: RoadmapId) -> Result<Option<Roadmap>, BackendError> {
        let roadmaps = self.roadmaps.lock().expect("roadmaps lock");
        Ok(roadmaps.iter().find(|r| r.id() == id).cloned())
    }

    async fn list_roadmaps(&self, limit: u32) -> Result<Vec<Roadmap>, BackendError> {
        let roadmaps = self.roadmaps.lock().expect("roadmaps lock");
        Ok(roadmaps
            .iter()
            .rev()
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn save_roadmap(&self, roadmap: &Roadmap) -> Result<(), BackendError> {
        let mut roadmaps = self.roadmaps.lock().expect("roadmaps lock");
        roadmaps.retain(|existing| existing.id() != roadmap.id());
        roadmaps.push(roadmap.clone());
        Ok(())
    }
}

#[async_trait]
impl ProgressStore for MemoryBackend {
    async fn load_progress(&self) -> Result<UserProgress, BackendError> {
        let mut progress = self.progress.lock().expect("progress lock");
        Ok(progress
            .get_or_insert_with(|| UserProgress::new(self.clock.now()))
            .clone())
    }

    async fn store_progress(&self, update: &UserProgress) -> Result<(), BackendError> {
        *self.progress.lock().expect("progress lock") = Some(update.clone());
        Ok(())
    }
}

#[async_trait]
impl AuthBackend for MemoryBackend {
    async fn sign_in(&self, credentials: &Credentials) -> Result<AuthSession, AuthError> {
        let accounts = self.accounts.lock().expect("accounts lock");
        match accounts.get(credentials.email()) {
            Some(password) if password == credentials.password() => {
                Ok(Self::session_for(credentials.email()))
            }
            _ => Err(AuthError::InvalidCredentials),
        }
    }

    async fn sign_up(&self, credentials: &Credentials) -> Result<AuthSession, AuthError> {
        let mut accounts = self.accounts.lock().expect("accounts lock");
        if accounts.contains_key(credentials.email()) {
            return Err(AuthError::AlreadyRegistered);
        }
        accounts.insert(
            credentials.email().to_string(),
            credentials.password().to_string(),
        );
        Ok(Self::session_for(credentials.email()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roadmap_core::model::Section;
    use roadmap_core::time::{fixed_clock, fixed_now};

    fn build_roadmap(title: &str) -> Roadmap {
        Roadmap::new(
            RoadmapId::generate(),
            title,
            None,
            vec![Section::new("Basics", vec!["HTML".into()]).unwrap()],
            Vec::new(),
            fixed_now(),
        )
        .unwrap()
    }

    #[tokio::test(flavor = "current_thread")]
    async fn memory_store_roundtrips_roadmaps() {
        let backend = MemoryBackend::new(fixed_clock());
        let roadmap = build_roadmap("Frontend");
        backend.save_roadmap(&roadmap).await.unwrap();

        let fetched = backend.get_roadmap(roadmap.id()).await.unwrap();
        assert_eq!(fetched, Some(roadmap.clone()));

        let missing = backend.get_roadmap(RoadmapId::generate()).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn memory_store_lists_newest_first() {
        let backend = MemoryBackend::new(fixed_clock());
        let first = build_roadmap("First");
        let second = build_roadmap("Second");
        backend.save_roadmap(&first).await.unwrap();
        backend.save_roadmap(&second).await.unwrap();

        let listed = backend.list_roadmaps(10).await.unwrap();
        assert_eq!(listed[0].title(), "Second");
        assert_eq!(listed[1].title(), "First");
    }

    #[tokio::test(flavor = "current_thread")]
    async fn progress_starts_empty_and_persists() {
        let backend = MemoryBackend::new(fixed_clock());
        let mut progress = backend.load_progress().await.unwrap();
        assert!(progress.completed_topics().is_empty());

        progress.mark_complete("HTML", fixed_now());
        backend.store_progress(&progress).await.unwrap();

        let reloaded = backend.load_progress().await.unwrap();
        assert!(reloaded.is_completed("HTML"));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn sign_in_rejects_unknown_and_wrong_credentials() {
        let backend = MemoryBackend::new(fixed_clock());
        backend.seed_account("ada@example.com", "secret1");

        let wrong = Credentials::new("ada@example.com", "wrong-password").unwrap();
        assert!(matches!(
            backend.sign_in(&wrong).await,
            Err(AuthError::InvalidCredentials)
        ));

        let unknown = Credentials::new("nobody@example.com", "secret1").unwrap();
        assert!(matches!(
            backend.sign_in(&unknown).await,
            Err(AuthError::InvalidCredentials)
        ));

        let valid = Credentials::new("ada@example.com", "secret1").unwrap();
        let session = backend.sign_in(&valid).await.unwrap();
        assert_eq!(session.email, "ada@example.com");
    }

    #[tokio::test(flavor = "current_thread")]
    async fn sign_up_rejects_duplicate_emails() {
        let backend = MemoryBackend::new(fixed_clock());
        let creds = Credentials::new("ada@example.com", "secret1").unwrap();
        backend.sign_up(&creds).await.unwrap();

        assert!(matches!(
            backend.sign_up(&creds).await,
            Err(AuthError::AlreadyRegistered)
        ));
    }

    #[test]
    fn auth_failures_classify_by_status_and_message() {
        assert!(matches!(
            classify_auth_failure(StatusCode::BAD_REQUEST, "Invalid login credentials"),
            AuthError::InvalidCredentials
        ));
        assert!(matches!(
            classify_auth_failure(StatusCode::BAD_REQUEST, "missing password"),
            AuthError::Malformed
        ));
        assert!(matches!(
            classify_auth_failure(StatusCode::UNPROCESSABLE_ENTITY, "User already registered"),
            AuthError::AlreadyRegistered
        ));
        assert!(matches!(
            classify_auth_failure(StatusCode::INTERNAL_SERVER_ERROR, "boom"),
            AuthError::Unexpected(_)
        ));
    }
}
