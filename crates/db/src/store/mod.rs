//! The persistence collaborator contract.
//!
//! A [`DocumentStore`] keeps JSON object documents under named collections and
//! offers per-document atomic operations only. There are no multi-document
//! transactions, so callers that must touch several documents (role deletion
//! sweeping preference records) do it step by step.
//!
//! Two backends are provided:
//!
//! - [`MemoryStore`]: a process-local map, used for development and tests.
//! - [`PgDocumentStore`]: a single PostgreSQL `documents` table with a JSONB
//!   body, queried by containment.

mod memory;
mod postgres;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::StoreError;

pub use memory::MemoryStore;
pub use postgres::PgDocumentStore;

// ---------------------------------------------------------------------------
// Collections
// ---------------------------------------------------------------------------

/// Well-known collection names.
pub mod collections {
    pub const ROLES: &str = "roles";
    pub const USER_PREFERENCES: &str = "user_preferences";
    pub const ANNOUNCEMENTS: &str = "announcements";
    pub const EVENTS: &str = "events";
    pub const NOTIFICATIONS: &str = "notifications";
}

/// Key under which every document carries its own id.
pub const ID_FIELD: &str = "id";

// ---------------------------------------------------------------------------
// Filter
// ---------------------------------------------------------------------------

/// One condition on a top-level document field.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterTerm {
    /// The field equals the value.
    Eq { field: String, value: Value },
    /// The field is an array containing the value.
    Contains { field: String, value: Value },
}

/// A conjunction of [`FilterTerm`]s. The empty filter matches every document.
///
/// ```rust
/// use campus_db::store::Filter;
///
/// let filter = Filter::all()
///     .eq("user_id", "u-1")
///     .eq("is_read", false);
/// assert_eq!(filter.terms().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    terms: Vec<FilterTerm>,
}

impl Filter {
    /// A filter that matches every document in the collection.
    pub fn all() -> Self {
        Self::default()
    }

    /// Require `field == value`.
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.terms.push(FilterTerm::Eq {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    /// Require the array at `field` to contain `value`.
    pub fn contains(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.terms.push(FilterTerm::Contains {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    pub fn terms(&self) -> &[FilterTerm] {
        &self.terms
    }

    /// Evaluate the filter against a document in memory.
    pub fn matches(&self, doc: &Value) -> bool {
        self.terms.iter().all(|term| match term {
            FilterTerm::Eq { field, value } => doc.get(field) == Some(value),
            FilterTerm::Contains { field, value } => doc
                .get(field)
                .and_then(Value::as_array)
                .is_some_and(|items| items.contains(value)),
        })
    }

    /// Render the filter as a JSONB containment object (`body @> $1`).
    ///
    /// `Contains` terms on the same field accumulate into one array. A later
    /// `Eq` on a field replaces any earlier term for that field.
    pub fn to_containment(&self) -> Value {
        let mut object = Map::new();
        for term in &self.terms {
            match term {
                FilterTerm::Eq { field, value } => {
                    object.insert(field.clone(), value.clone());
                }
                FilterTerm::Contains { field, value } => {
                    let entry = object
                        .entry(field.clone())
                        .or_insert_with(|| Value::Array(Vec::new()));
                    match entry {
                        Value::Array(items) => items.push(value.clone()),
                        other => *other = Value::Array(vec![value.clone()]),
                    }
                }
            }
        }
        Value::Object(object)
    }
}

// ---------------------------------------------------------------------------
// DocumentStore
// ---------------------------------------------------------------------------

/// Generic document persistence, keyed by `(collection, id)`.
///
/// Documents must be JSON objects. The store writes each document's id into
/// its body under [`ID_FIELD`], and never lets a patch change it.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert `doc` under a freshly generated id and return that id.
    async fn create(&self, collection: &str, doc: Value) -> Result<String, StoreError>;

    /// Insert `doc` under a caller-chosen id.
    ///
    /// Fails with [`StoreError::Conflict`] if the id is already taken.
    async fn create_with_id(&self, collection: &str, id: &str, doc: Value)
        -> Result<(), StoreError>;

    /// Fetch a document, or `None` if it does not exist.
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, StoreError>;

    /// Shallow-merge the top-level fields of `patch` into an existing document.
    ///
    /// Fails with [`StoreError::NotFound`] if the document does not exist.
    async fn update(&self, collection: &str, id: &str, patch: Value) -> Result<(), StoreError>;

    /// Remove a document.
    ///
    /// Fails with [`StoreError::NotFound`] if the document does not exist, so
    /// repeated deletion of the same id is an error.
    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError>;

    /// Return every document in `collection` that matches `filter`, in
    /// insertion order.
    async fn query(&self, collection: &str, filter: &Filter) -> Result<Vec<Value>, StoreError>;

    /// Check that the backend is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}

// ---------------------------------------------------------------------------
// Helpers shared by the backends
// ---------------------------------------------------------------------------

/// Generate a new time-ordered document id.
pub(crate) fn new_id() -> String {
    uuid::Uuid::now_v7().to_string()
}

/// Unwrap a JSON object, rejecting any other value.
pub(crate) fn into_object(value: Value) -> Result<Map<String, Value>, StoreError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::InvalidDocument(format!(
            "expected a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

/// Prepare a document body for insertion: must be an object, and carries `id`.
pub(crate) fn with_id(doc: Value, id: &str) -> Result<Value, StoreError> {
    let mut object = into_object(doc)?;
    object.insert(ID_FIELD.to_string(), Value::String(id.to_string()));
    Ok(Value::Object(object))
}

/// Prepare a patch: must be an object, and may not touch `id`.
pub(crate) fn sanitize_patch(patch: Value) -> Result<Map<String, Value>, StoreError> {
    let mut object = into_object(patch)?;
    object.remove(ID_FIELD);
    Ok(object)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
