#![forbid(unsafe_code)]

//! Cache-backed sessions and the lucky-number service built on them.
//!
//! A visitor's first request allocates a session, draws a random integer in
//! `[1, 10]`, and persists it in a shared cache keyed by the session id the
//! client carries in the `SGSID` cookie. Every later request with that cookie
//! gets the same number back.
//!
//! The store seam is [`store::SessionStore`]; [`inmemory::InMemorySessionStore`]
//! serves development and tests, [`redis_store::RedisSessionStore`] (feature
//! `redis`, on by default) serves deployments.

pub mod config;
pub mod error;
pub mod http;
pub mod inmemory;
pub mod model;
#[cfg(feature = "redis")]
pub mod redis_store;
pub mod store;

pub use error::{SessionError, SessionResult};
pub use model::{AttrValue, Attributes, Session, SessionId};
pub use store::{create_session_store, SessionBackendConfig, SessionStore};
