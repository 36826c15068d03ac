use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// Opaque identifier for a session, delivered to clients via cookie.
///
/// Generated identifiers are random v4 UUIDs rendered as 32 hex characters.
/// Identifiers received from clients are carried verbatim; the id assigned to
/// a session never changes afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Borrows the underlying id as `&str`.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for SessionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for SessionId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Attribute values a session may persist.
///
/// The set is deliberately closed; payloads on the wire are plain JSON
/// scalars, e.g. `{"lucky_num":7}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl AttrValue {
    /// Returns the integer value, if this is an integer attribute.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            AttrValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the boolean value, if this is a boolean attribute.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttrValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the string value, if this is a string attribute.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Str(value) => Some(value),
            _ => None,
        }
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Bool(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::Int(value)
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Str(value.to_owned())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Str(value)
    }
}

/// Attribute mapping persisted for a session.
pub type Attributes = BTreeMap<String, AttrValue>;

/// In-memory view of one client's session for the duration of a request.
///
/// Mutations only touch this value until the caller persists it through a
/// store; `dirty` tracks whether a write-back is pending, `is_new` whether any
/// prior state existed under this id.
#[derive(Clone, Debug)]
pub struct Session {
    id: SessionId,
    attributes: Attributes,
    dirty: bool,
    is_new: bool,
}

impl Session {
    /// Creates a session with a fresh id and no attributes.
    pub fn new() -> Self {
        Self {
            id: SessionId::generate(),
            attributes: Attributes::new(),
            dirty: false,
            is_new: true,
        }
    }

    /// Reconstructs a session from state a store fetched (or failed to fetch)
    /// for a client-supplied id. A cache miss passes empty attributes here;
    /// the id is preserved either way.
    pub fn loaded(id: SessionId, attributes: Attributes) -> Self {
        Self {
            id,
            attributes,
            dirty: false,
            is_new: false,
        }
    }

    /// The session's identifier, stable for its lifetime.
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Read-only view of the attribute mapping.
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Looks up an attribute.
    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.attributes.get(key)
    }

    /// Whether the attribute is present.
    pub fn contains(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    /// Sets an attribute and marks the session dirty.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) {
        self.attributes.insert(key.into(), value.into());
        self.dirty = true;
    }

    /// Removes an attribute, marking the session dirty if one was present.
    pub fn remove(&mut self, key: &str) -> Option<AttrValue> {
        let removed = self.attributes.remove(key);
        if removed.is_some() {
            self.dirty = true;
        }
        removed
    }

    /// Whether attributes were mutated since this value was constructed.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Whether no persisted state existed when this session was constructed.
    pub fn is_new(&self) -> bool {
        self.is_new
    }

    /// Whether the session must be written back: it was mutated, or it never
    /// existed server-side at all.
    pub fn should_save(&self) -> bool {
        self.dirty || self.is_new
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
