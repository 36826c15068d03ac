//! HTTP surface: a single `GET /` that replies with the visitor's lucky
//! number, stable across visits for as long as the session entry lives.

use crate::error::SessionError;
use crate::model::{AttrValue, SessionId};
use crate::store::SessionStore;
use axum::extract::State;
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use rand::Rng;
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

/// Cookie carrying the session id.
pub const COOKIE_NAME: &str = "SGSID";

/// Session attribute holding the visitor's number.
pub const LUCKY_NUM_KEY: &str = "lucky_num";

/// Shared state injected into every handler.
///
/// The store is an explicit constructor dependency; nothing in this module
/// reaches for process-wide state.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn SessionStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }
}

/// Builds the application router. Unknown paths and methods fall through to
/// axum's 404/405 handling.
pub fn router(state: AppState) -> Router {
    Router::new().route("/", get(index)).with_state(state)
}

/// Failures a handler can surface. Every variant maps to an explicit status;
/// nothing propagates as a silent drop of session continuity.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("session store failure: {0}")]
    Store(#[from] SessionError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        let status = match &self {
            HandlerError::Store(SessionError::Unavailable(_))
            | HandlerError::Store(SessionError::Timeout(_)) => StatusCode::SERVICE_UNAVAILABLE,
            HandlerError::Store(SessionError::Serialization(_)) | HandlerError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        warn!(error = %self, "request failed");
        (status, self.to_string()).into_response()
    }
}

/// Extracts the named cookie from the `Cookie` header, if present.
///
/// Pairs that do not parse as `name=value` are skipped, so a malformed header
/// degrades to "no session" rather than an error.
fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;
    raw.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name && !value.is_empty()).then_some(value)
    })
}

async fn index(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, HandlerError> {
    let incoming_sid = cookie_value(&headers, COOKIE_NAME).map(SessionId::from);

    // A client-supplied id that misses the cache keeps its id and gets no
    // fresh cookie; only a request with no cookie at all allocates one.
    let mut session = match &incoming_sid {
        None => state.store.new_session(),
        Some(id) => state.store.load(id).await?,
    };

    let lucky_num = match session.get(LUCKY_NUM_KEY).and_then(AttrValue::as_int) {
        Some(n) => n,
        None => {
            let n: i64 = rand::rng().random_range(1..=10);
            session.insert(LUCKY_NUM_KEY, n);
            n
        }
    };

    let body = format!("Hello, your lucky number is: {lucky_num}");

    if session.should_save() {
        state.store.save(&session, None).await?;
    }

    let mut response = (StatusCode::OK, body).into_response();
    if incoming_sid.is_none() {
        let cookie = format!("{COOKIE_NAME}={}", session.id());
        let value = HeaderValue::from_str(&cookie)
            .map_err(|err| HandlerError::Internal(format!("unusable cookie value: {err}")))?;
        response.headers_mut().insert(header::SET_COOKIE, value);
    }
    Ok(response)
}
