use crate::error::SessionResult;
use crate::model::{Attributes, Session, SessionId};
use crate::store::SessionStore;
use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::Mutex;
use std::time::Duration as StdDuration;
use time::{Duration, OffsetDateTime};

/// Default entry lifetime, matching the cache-backed stores.
pub const DEFAULT_TTL: StdDuration = StdDuration::from_secs(600);

struct Entry {
    attributes: Attributes,
    expires_at: Option<OffsetDateTime>,
}

impl Entry {
    fn is_expired(&self, now: OffsetDateTime) -> bool {
        match self.expires_at {
            Some(exp) => now >= exp,
            None => false,
        }
    }
}

/// In-memory implementation backed by a concurrent hash map.
///
/// Expiration is handled lazily on access plus a throttled sweep; there is no
/// background maintenance task.
pub struct InMemorySessionStore {
    entries: DashMap<String, Entry>,
    cleanup_hint: Mutex<OffsetDateTime>,
    default_ttl: StdDuration,
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self {
            entries: DashMap::new(),
            cleanup_hint: Mutex::new(OffsetDateTime::now_utc()),
            default_ttl: DEFAULT_TTL,
        }
    }
}

impl InMemorySessionStore {
    /// Constructs a store with the default TTL.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the TTL applied when `save` receives no explicit one.
    /// Zero disables expiry.
    pub fn with_default_ttl(mut self, ttl: StdDuration) -> Self {
        self.default_ttl = ttl;
        self
    }

    fn now() -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }

    fn deadline(&self, ttl: Option<StdDuration>, now: OffsetDateTime) -> Option<OffsetDateTime> {
        let ttl = ttl.unwrap_or(self.default_ttl);
        if ttl.is_zero() {
            return None;
        }
        // TTLs too large for the time crate saturate to "never expires".
        Duration::try_from(ttl).ok().map(|ttl| now + ttl)
    }

    fn maybe_cleanup(&self, now: OffsetDateTime) {
        let mut guard = self.cleanup_hint.lock();
        if now - *guard < Duration::seconds(60) {
            return;
        }

        let stale_keys: Vec<_> = self
            .entries
            .iter()
            .filter_map(|entry| {
                if entry.value().is_expired(now) {
                    Some(entry.key().clone())
                } else {
                    None
                }
            })
            .collect();

        for key in stale_keys {
            self.entries.remove(&key);
        }

        *guard = now;
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self, id: &SessionId) -> SessionResult<Session> {
        let now = Self::now();
        self.maybe_cleanup(now);
        if let Some(entry) = self.entries.get(id.as_str()) {
            if entry.is_expired(now) {
                drop(entry);
                self.entries.remove(id.as_str());
            } else {
                return Ok(Session::loaded(id.clone(), entry.attributes.clone()));
            }
        }
        Ok(Session::loaded(id.clone(), Attributes::new()))
    }

    async fn save(&self, session: &Session, ttl: Option<StdDuration>) -> SessionResult<()> {
        let now = Self::now();
        self.maybe_cleanup(now);
        let entry = Entry {
            attributes: session.attributes().clone(),
            expires_at: self.deadline(ttl, now),
        };
        self.entries.insert(session.id().as_str().to_owned(), entry);
        Ok(())
    }

    async fn delete(&self, id: &SessionId) -> SessionResult<bool> {
        Ok(self.entries.remove(id.as_str()).is_some())
    }
}
