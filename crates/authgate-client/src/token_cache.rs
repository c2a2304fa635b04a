//! In-memory access token cache with change notification.
//!
//! Holds at most one access token plus a derived expiry estimate
//! (now + server-declared TTL at issuance; the token's signed claims are
//! never parsed here). Every state change increments a version counter so
//! concurrent callers can detect that someone else already refreshed.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use tracing::warn;

/// Why the cache changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeCause {
    /// A login stored a fresh token.
    Login,
    /// A refresh replaced the token.
    Refresh,
    /// The cache was emptied.
    Clear,
}

/// Snapshot delivered to change listeners after each state change.
#[derive(Debug, Clone)]
pub struct TokenChange {
    /// The new token, absent after a clear.
    pub token: Option<String>,
    /// Declared TTL of the new token in seconds.
    pub expires_in_sec: Option<u64>,
    /// What caused the change.
    pub cause: ChangeCause,
}

/// A registered change listener.
pub type Listener = Arc<dyn Fn(&TokenChange) + Send + Sync>;

/// Handle for removing a listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerId(u64);

struct CacheInner {
    token: Option<String>,
    expires_at: Option<DateTime<Utc>>,
    version: u64,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener_id: u64,
}

/// Volatile, owned token state with an injected lifetime.
///
/// The mutex is held only for short read-modify-write sections and never
/// across an await; listener callbacks run outside the lock against a
/// post-update snapshot.
pub struct TokenCache {
    inner: Mutex<CacheInner>,
}

impl Default for TokenCache {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(CacheInner {
                token: None,
                expires_at: None,
                version: 0,
                listeners: Vec::new(),
                next_listener_id: 0,
            }),
        }
    }

    /// Returns the current access token, if any.
    pub fn current(&self) -> Option<String> {
        self.inner.lock().unwrap().token.clone()
    }

    /// Returns the current version. Incremented on login, refresh, clear.
    pub fn version(&self) -> u64 {
        self.inner.lock().unwrap().version
    }

    /// Returns the expiry estimate for the current token.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.inner.lock().unwrap().expires_at
    }

    /// Whether the expiry estimate says the current token is stale.
    pub fn is_expired_estimate(&self) -> bool {
        match self.expires_at() {
            Some(at) => at <= Utc::now(),
            None => true,
        }
    }

    /// Stores a token, recomputes the expiry estimate, bumps the version,
    /// and notifies listeners.
    pub fn set(&self, token: String, ttl_seconds: u64, cause: ChangeCause) {
        let change = TokenChange {
            token: Some(token.clone()),
            expires_in_sec: Some(ttl_seconds),
            cause,
        };

        let listeners = {
            let mut inner = self.inner.lock().unwrap();
            inner.token = Some(token);
            inner.expires_at = Some(Utc::now() + Duration::seconds(ttl_seconds as i64));
            inner.version += 1;
            snapshot_listeners(&inner)
        };

        notify(&listeners, &change);
    }

    /// Empties the cache, bumps the version, and notifies listeners.
    pub fn clear(&self) {
        let change = TokenChange {
            token: None,
            expires_in_sec: None,
            cause: ChangeCause::Clear,
        };

        let listeners = {
            let mut inner = self.inner.lock().unwrap();
            inner.token = None;
            inner.expires_at = None;
            inner.version += 1;
            snapshot_listeners(&inner)
        };

        notify(&listeners, &change);
    }

    /// Registers a change listener.
    pub fn subscribe(&self, listener: Listener) -> ListenerId {
        let mut inner = self.inner.lock().unwrap();
        let id = ListenerId(inner.next_listener_id);
        inner.next_listener_id += 1;
        inner.listeners.push((id, listener));
        id
    }

    /// Removes a previously registered listener. Unknown ids are a no-op.
    pub fn unsubscribe(&self, id: ListenerId) {
        let mut inner = self.inner.lock().unwrap();
        inner.listeners.retain(|(existing, _)| *existing != id);
    }
}

impl std::fmt::Debug for TokenCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock().unwrap();
        f.debug_struct("TokenCache")
            .field("has_token", &inner.token.is_some())
            .field("version", &inner.version)
            .field("listeners", &inner.listeners.len())
            .finish()
    }
}

fn snapshot_listeners(inner: &CacheInner) -> Vec<Listener> {
    inner.listeners.iter().map(|(_, l)| Arc::clone(l)).collect()
}

/// Invokes each listener in isolation; a panicking listener must not
/// prevent the rest from running.
fn notify(listeners: &[Listener], change: &TokenChange) {
    for listener in listeners {
        if catch_unwind(AssertUnwindSafe(|| listener(change))).is_err() {
            warn!("Token change listener panicked");
        }
    }
}
