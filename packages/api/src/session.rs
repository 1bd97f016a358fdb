//! # Session store
//!
//! Single source of truth for "who is signed in". Holds the bearer token
//! (persisted so a reload stays signed in) and the last profile fetched for
//! it (memory only, re-validated on load by the auth provider).
//!
//! Invariant: a cached profile never outlives its token. Clearing or
//! replacing the token drops the profile, and a profile can only be cached
//! while a token is present.

use std::sync::{Arc, Mutex};

use crate::models::UserProfile;
use crate::storage;

const TOKEN_KEY: &str = "homestake-token";

#[derive(Default)]
struct SessionData {
    token: Option<String>,
    user: Option<UserProfile>,
}

/// Cheaply cloneable handle; clones share state.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Mutex<SessionData>>,
    token_key: String,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    /// Loads any persisted token. The profile is left empty until the
    /// owner re-validates the token against the backend.
    pub fn new() -> Self {
        Self::with_storage_key(TOKEN_KEY)
    }

    /// Same as [`SessionStore::new`] but namespaced under a different
    /// storage key, so tests do not share persisted state.
    pub fn with_storage_key(token_key: &str) -> Self {
        let token = storage::get_item(token_key);
        Self {
            inner: Arc::new(Mutex::new(SessionData { token, user: None })),
            token_key: token_key.to_string(),
        }
    }

    pub fn token(&self) -> Option<String> {
        self.inner.lock().unwrap().token.clone()
    }

    pub fn has_token(&self) -> bool {
        self.inner.lock().unwrap().token.is_some()
    }

    /// Stores a freshly issued token, forgetting any profile cached for
    /// the previous one.
    pub fn set_token(&self, token: &str) {
        let mut data = self.inner.lock().unwrap();
        data.token = Some(token.to_string());
        data.user = None;
        storage::set_item(&self.token_key, token);
    }

    pub fn user(&self) -> Option<UserProfile> {
        self.inner.lock().unwrap().user.clone()
    }

    /// Caches the profile backing the current token. Ignored when no token
    /// is held, since a profile without a token is not a valid state.
    pub fn set_user(&self, user: UserProfile) {
        let mut data = self.inner.lock().unwrap();
        if data.token.is_some() {
            data.user = Some(user);
        } else {
            tracing::warn!("dropping profile cache update without a session token");
        }
    }

    pub fn is_authenticated(&self) -> bool {
        let data = self.inner.lock().unwrap();
        data.token.is_some() && data.user.is_some()
    }

    /// Wipes token and profile, both in memory and from storage. Called on
    /// explicit sign-out and whenever the backend answers 401.
    pub fn clear(&self) {
        let mut data = self.inner.lock().unwrap();
        data.token = None;
        data.user = None;
        storage::remove_item(&self.token_key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    fn profile(email: &str) -> UserProfile {
        UserProfile {
            id: "u1".into(),
            email: email.into(),
            full_name: Some("Test User".into()),
            phone: None,
            role: Role::Investor,
            is_verified: true,
            created_at: None,
        }
    }

    #[test]
    fn token_persists_across_instances() {
        let store = SessionStore::with_storage_key("test-session-persist");
        store.set_token("tok-1");
        let reloaded = SessionStore::with_storage_key("test-session-persist");
        assert_eq!(reloaded.token().as_deref(), Some("tok-1"));
        assert!(!reloaded.is_authenticated(), "profile is never persisted");
        store.clear();
    }

    #[test]
    fn clear_wipes_token_and_profile() {
        let store = SessionStore::with_storage_key("test-session-clear");
        store.set_token("tok-2");
        store.set_user(profile("a@example.com"));
        assert!(store.is_authenticated());

        store.clear();
        assert_eq!(store.token(), None);
        assert_eq!(store.user(), None);
        assert!(!store.is_authenticated());
        let reloaded = SessionStore::with_storage_key("test-session-clear");
        assert_eq!(reloaded.token(), None);
    }

    #[test]
    fn profile_requires_token() {
        let store = SessionStore::with_storage_key("test-session-no-token");
        store.clear();
        store.set_user(profile("b@example.com"));
        assert_eq!(store.user(), None);
    }

    #[test]
    fn new_token_drops_stale_profile() {
        let store = SessionStore::with_storage_key("test-session-rotate");
        store.set_token("tok-3");
        store.set_user(profile("c@example.com"));
        store.set_token("tok-4");
        assert_eq!(store.user(), None);
        store.clear();
    }
}
