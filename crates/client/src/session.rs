//! Process-wide session state: one bearer token, one operator identity.
//!
//! Written once at login, cleared once at logout; the gateway reads the
//! token on every call. No refresh or rotation logic.

use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

/// Authenticated operator identity as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Default)]
struct SessionState {
    token: Option<String>,
    user: Option<AuthUser>,
}

/// Shared handle to the session; cloning is cheap.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<SessionState>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log_in(&self, token: String, user: AuthUser) {
        let mut state = self.inner.write().expect("session lock poisoned");
        state.token = Some(token);
        state.user = Some(user);
    }

    pub fn log_out(&self) {
        let mut state = self.inner.write().expect("session lock poisoned");
        state.token = None;
        state.user = None;
    }

    pub fn token(&self) -> Option<String> {
        self.inner.read().expect("session lock poisoned").token.clone()
    }

    pub fn user(&self) -> Option<AuthUser> {
        self.inner.read().expect("session lock poisoned").user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.read().expect("session lock poisoned").token.is_some()
    }
}
