use crate::error::{redis_error, SessionError, SessionResult};
use crate::model::{Attributes, Session, SessionId};
use crate::store::SessionStore;
use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

const DEFAULT_NAMESPACE: &str = "SGS_";
const DEFAULT_TTL: Duration = Duration::from_secs(600);
const DEFAULT_OP_TIMEOUT: Duration = Duration::from_secs(2);

/// Redis-backed session store that mirrors the in-memory semantics.
///
/// Keys are prefixed with the configured namespace before reaching the
/// backend, so several applications can safely share one cluster. Every
/// operation runs once against a bounded deadline; there are no retries.
///
/// Constructors accept connection URLs only; no Redis client types appear in
/// the public API.
pub struct RedisSessionStore {
    client: redis::Client,
    namespace: String,
    default_ttl: Duration,
    op_timeout: Duration,
}

impl RedisSessionStore {
    /// Creates a store using a Redis URL and the default namespace prefix.
    pub fn from_url(url: impl AsRef<str>) -> SessionResult<Self> {
        Self::from_url_with_namespace(url, DEFAULT_NAMESPACE)
    }

    /// Creates a store using a Redis URL and a custom namespace prefix.
    pub fn from_url_with_namespace(
        url: impl AsRef<str>,
        namespace: impl Into<String>,
    ) -> SessionResult<Self> {
        let client = redis::Client::open(url.as_ref()).map_err(redis_error)?;
        Ok(Self {
            client,
            namespace: namespace.into(),
            default_ttl: DEFAULT_TTL,
            op_timeout: DEFAULT_OP_TIMEOUT,
        })
    }

    /// Overrides the TTL applied when `save` receives no explicit one.
    /// Zero disables expiry.
    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }

    /// Overrides the per-operation deadline.
    pub fn with_op_timeout(mut self, timeout: Duration) -> Self {
        self.op_timeout = timeout;
        self
    }

    fn entry_key(&self, id: &SessionId) -> String {
        format!("{}{}", self.namespace, id.as_str())
    }

    async fn conn(&self) -> SessionResult<MultiplexedConnection> {
        self.bounded(self.client.get_multiplexed_async_connection())
            .await
    }

    async fn bounded<T, F>(&self, op: F) -> SessionResult<T>
    where
        F: Future<Output = redis::RedisResult<T>>,
    {
        match tokio::time::timeout(self.op_timeout, op).await {
            Ok(result) => result.map_err(redis_error),
            Err(_) => Err(SessionError::Timeout(self.op_timeout)),
        }
    }

    fn serialize(attributes: &Attributes) -> SessionResult<String> {
        serde_json::to_string(attributes).map_err(SessionError::from)
    }

    fn deserialize(payload: &str) -> SessionResult<Attributes> {
        serde_json::from_str(payload).map_err(SessionError::from)
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn load(&self, id: &SessionId) -> SessionResult<Session> {
        let key = self.entry_key(id);
        let mut conn = self.conn().await?;
        let payload: Option<String> = self.bounded(conn.get(&key)).await?;
        let attributes = match payload {
            Some(raw) => Self::deserialize(&raw)?,
            None => {
                debug!(%id, "session miss, degrading to empty session");
                Attributes::new()
            }
        };
        Ok(Session::loaded(id.clone(), attributes))
    }

    async fn save(&self, session: &Session, ttl: Option<Duration>) -> SessionResult<()> {
        let key = self.entry_key(session.id());
        let payload = Self::serialize(session.attributes())?;
        let ttl = ttl.unwrap_or(self.default_ttl);
        let mut conn = self.conn().await?;
        if ttl.is_zero() {
            let _: () = self.bounded(conn.set(&key, payload)).await?;
        } else {
            // SET EX only takes whole seconds; sub-second TTLs round up.
            let seconds = ttl.as_secs().max(1);
            let _: () = self.bounded(conn.set_ex(&key, payload, seconds)).await?;
        }
        debug!(id = %session.id(), "session persisted");
        Ok(())
    }

    async fn delete(&self, id: &SessionId) -> SessionResult<bool> {
        let key = self.entry_key(id);
        let mut conn = self.conn().await?;
        let removed: i64 = self.bounded(conn.del(&key)).await?;
        Ok(removed > 0)
    }
}
