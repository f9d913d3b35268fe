//! Per-visitor session data.
//!
//! A session layer puts the visitor's [`Session`] into the request extensions.
//! The locale middleware only reads and writes it when present. [`SessionStore`]
//! is the in-memory store the demo server uses, keyed by the id carried in the
//! [`SESSION_COOKIE`] cookie.

use axum::http::header::COOKIE;
use axum::http::HeaderMap;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Session key holding the active language.
pub const SESSION_LANG_KEY: &str = "lang";

/// Cookie carrying the session id.
pub const SESSION_COOKIE: &str = "locale_session";

/// Generate a new random session id.
pub fn generate_session_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Session id from the request's `Cookie` headers, if any.
pub fn session_id_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, id)| id.trim().to_string())
        .filter(|id| !id.is_empty())
}

#[derive(Debug, Default)]
struct SessionData {
    values: HashMap<String, String>,
    /// Flash keys set during this request, kept for the next one
    flash_new: Vec<String>,
    /// Flash keys from the previous request, dropped when the request ends
    flash_old: Vec<String>,
}

/// Cloneable handle to one session's data.
#[derive(Debug, Clone, Default)]
pub struct Session {
    inner: Arc<RwLock<SessionData>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        let data = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        data.values.get(key).cloned()
    }

    pub fn insert(&self, key: impl Into<String>, value: impl Into<String>) {
        let mut data = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        data.values.insert(key.into(), value.into());
    }

    pub fn remove(&self, key: &str) -> Option<String> {
        let mut data = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        data.values.remove(key)
    }

    /// Store a value that survives until the end of the next request.
    pub fn flash(&self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let mut data = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        data.flash_old.retain(|k| *k != key);
        if !data.flash_new.contains(&key) {
            data.flash_new.push(key.clone());
        }
        data.values.insert(key, value.into());
    }

    /// Keep the previous request's flash data for one more request.
    pub fn reflash(&self) {
        let mut data = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let old = std::mem::take(&mut data.flash_old);
        for key in old {
            if !data.flash_new.contains(&key) {
                data.flash_new.push(key);
            }
        }
    }

    /// End-of-request bookkeeping: drop expired flash values and age the new ones.
    pub fn age_flash(&self) {
        let mut data = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let expired = std::mem::take(&mut data.flash_old);
        for key in &expired {
            data.values.remove(key);
        }
        data.flash_old = std::mem::take(&mut data.flash_new);
    }
}

/// In-memory sessions keyed by session id.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<Session> {
        let sessions = self.sessions.read().unwrap_or_else(PoisonError::into_inner);
        sessions.get(id).cloned()
    }

    /// Start a new empty session and return its id.
    pub fn create(&self) -> (String, Session) {
        let id = generate_session_id();
        let session = Session::new();
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        sessions.insert(id.clone(), session.clone());
        (id, session)
    }

    pub fn len(&self) -> usize {
        self.sessions.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
