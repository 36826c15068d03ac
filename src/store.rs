use crate::error::SessionResult;
use crate::inmemory::InMemorySessionStore;
use crate::model::{Session, SessionId};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Cache-backed session repository used by the request handlers.
///
/// Implementations namespace their keys before touching the backend so
/// several applications can share one cache cluster. All operations are
/// single-attempt; a backend failure surfaces as a [`crate::SessionError`]
/// and the caller decides how to respond.
#[async_trait]
pub trait SessionStore: Send + Sync + 'static {
    /// Allocates a session with a fresh identifier and empty attributes.
    /// Does not touch the cache.
    fn new_session(&self) -> Session {
        Session::new()
    }

    /// Fetches the session stored under `id`.
    ///
    /// A cache miss is not an error: the returned session keeps the supplied
    /// id and starts with empty attributes.
    async fn load(&self, id: &SessionId) -> SessionResult<Session>;

    /// Persists the session's attribute mapping under its id.
    ///
    /// A `ttl` of `None` applies the store default; a zero duration persists
    /// the entry without expiry.
    async fn save(&self, session: &Session, ttl: Option<Duration>) -> SessionResult<()>;

    /// Removes the stored entry, reporting whether one existed.
    async fn delete(&self, id: &SessionId) -> SessionResult<bool>;
}

/// Backend selection for [`create_session_store`].
#[derive(Clone, Debug)]
pub enum SessionBackendConfig {
    /// Process-local store, for development and tests.
    InMemory {
        /// TTL applied when `save` is called without an override.
        default_ttl: Duration,
    },
    /// Redis-backed store shared across server processes.
    #[cfg(feature = "redis")]
    Redis {
        /// Connection URL, e.g. `redis://127.0.0.1:6379`.
        url: String,
        /// Prefix prepended to every key sent to the backend.
        namespace: String,
        /// TTL applied when `save` is called without an override.
        default_ttl: Duration,
        /// Deadline for each individual cache operation.
        op_timeout: Duration,
    },
}

/// Builds the configured session store.
pub fn create_session_store(
    config: SessionBackendConfig,
) -> SessionResult<Arc<dyn SessionStore>> {
    match config {
        SessionBackendConfig::InMemory { default_ttl } => {
            Ok(Arc::new(InMemorySessionStore::new().with_default_ttl(default_ttl)))
        }
        #[cfg(feature = "redis")]
        SessionBackendConfig::Redis {
            url,
            namespace,
            default_ttl,
            op_timeout,
        } => {
            let store = crate::redis_store::RedisSessionStore::from_url_with_namespace(
                url, namespace,
            )?
            .with_default_ttl(default_ttl)
            .with_op_timeout(op_timeout);
            Ok(Arc::new(store))
        }
    }
}
