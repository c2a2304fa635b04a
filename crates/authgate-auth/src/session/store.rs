//! Server-side refresh session registry.
//!
//! Maps a refresh token's session ID (`jti`) to its subject and stored
//! expiry. A refresh token is live iff its session is present here; the
//! stored expiry is authoritative over the token's own embedded expiry.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tracing::warn;
use uuid::Uuid;

/// A live refresh session record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshSession {
    /// Subject the refresh token was issued to.
    pub subject: String,
    /// Stored expiry; honored even if the token's embedded expiry differs.
    pub expires_at: DateTime<Utc>,
}

/// Concurrent in-memory session registry.
///
/// No cross-key coordination is needed, so a concurrent map with per-key
/// entry operations is sufficient.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: DashMap<Uuid, RefreshSession>,
}

impl SessionStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    /// Registers a session for a freshly issued refresh token.
    ///
    /// Session IDs are minted from a cryptographically random generator, so
    /// overwriting a live entry indicates an id-generation defect.
    pub fn register(&self, session_id: Uuid, subject: &str, expires_at: DateTime<Utc>) {
        let previous = self.sessions.insert(
            session_id,
            RefreshSession {
                subject: subject.to_string(),
                expires_at,
            },
        );

        if previous.is_some() {
            warn!(session_id = %session_id, "Session id collision on register");
        }
    }

    /// Looks up a session by ID.
    ///
    /// Absent covers never-existed and revoked alike. A record past its
    /// stored expiry is treated as absent and removed.
    pub fn lookup(&self, session_id: Uuid) -> Option<RefreshSession> {
        let record = self.sessions.get(&session_id)?.clone();

        if record.expires_at <= Utc::now() {
            drop(self.sessions.remove(&session_id));
            return None;
        }

        Some(record)
    }

    /// Revokes a session. Revoking an absent ID is a no-op.
    pub fn revoke(&self, session_id: Uuid) {
        self.sessions.remove(&session_id);
    }

    /// Number of live (possibly expired-but-unpruned) records.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
