//! Process-local [`DocumentStore`] backed by a `tokio::sync::RwLock`.
//!
//! Every operation takes the lock once, so each call is atomic with respect to
//! the others just like a single-document write on a real backend.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use super::{new_id, sanitize_patch, with_id, DocumentStore, Filter};
use crate::error::StoreError;

#[derive(Debug, Clone)]
struct Entry {
    seq: u64,
    body: Value,
}

type Collection = HashMap<String, Entry>;

/// In-memory document store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Collection>>,
    next_seq: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_seq(&self) -> u64 {
        self.next_seq.fetch_add(1, Ordering::Relaxed)
    }

    async fn insert(&self, collection: &str, id: &str, doc: Value) -> Result<(), StoreError> {
        let body = with_id(doc, id)?;
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_string()).or_default();
        if docs.contains_key(id) {
            return Err(StoreError::conflict(collection, id));
        }
        let seq = self.next_seq();
        docs.insert(id.to_string(), Entry { seq, body });
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn create(&self, collection: &str, doc: Value) -> Result<String, StoreError> {
        let id = new_id();
        self.insert(collection, &id, doc).await?;
        Ok(id)
    }

    async fn create_with_id(
        &self,
        collection: &str,
        id: &str,
        doc: Value,
    ) -> Result<(), StoreError> {
        self.insert(collection, id, doc).await
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, StoreError> {
        Ok(self
            .collections
            .read()
            .await
            .get(collection)
            .and_then(|docs| docs.get(id))
            .map(|entry| entry.body.clone()))
    }

    async fn update(&self, collection: &str, id: &str, patch: Value) -> Result<(), StoreError> {
        let patch = sanitize_patch(patch)?;
        let mut collections = self.collections.write().await;
        let entry = collections
            .get_mut(collection)
            .and_then(|docs| docs.get_mut(id))
            .ok_or_else(|| StoreError::not_found(collection, id))?;
        if let Value::Object(body) = &mut entry.body {
            body.extend(patch);
        }
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        collections
            .get_mut(collection)
            .and_then(|docs| docs.remove(id))
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found(collection, id))
    }

    async fn query(&self, collection: &str, filter: &Filter) -> Result<Vec<Value>, StoreError> {
        let collections = self.collections.read().await;
        let Some(docs) = collections.get(collection) else {
            return Ok(Vec::new());
        };
        let mut matched: Vec<&Entry> = docs.values().filter(|e| filter.matches(&e.body)).collect();
        matched.sort_by_key(|e| e.seq);
        Ok(matched.into_iter().map(|e| e.body.clone()).collect())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn create_assigns_id_and_stores_it_in_body() {
        let store = MemoryStore::new();
        let id = store.create("things", json!({"name": "a"})).await.unwrap();

        let doc = store.get("things", &id).await.unwrap().expect("doc exists");
        assert_eq!(doc["id"], id.as_str());
        assert_eq!(doc["name"], "a");
    }

    #[tokio::test]
    async fn create_with_id_conflicts_on_duplicate() {
        let store = MemoryStore::new();
        store
            .create_with_id("roles", "general", json!({"name": "General"}))
            .await
            .unwrap();
        let err = store
            .create_with_id("roles", "general", json!({"name": "Other"}))
            .await
            .unwrap_err();
        assert_matches!(err, StoreError::Conflict { .. });

        let doc = store.get("roles", "general").await.unwrap().unwrap();
        assert_eq!(doc["name"], "General");
    }

    #[tokio::test]
    async fn update_merges_top_level_fields_and_keeps_id() {
        let store = MemoryStore::new();
        let id = store
            .create("roles", json!({"name": "X", "color": "#000000"}))
            .await
            .unwrap();

        store
            .update("roles", &id, json!({"color": "#ABCDEF", "id": "hijack"}))
            .await
            .unwrap();

        let doc = store.get("roles", &id).await.unwrap().unwrap();
        assert_eq!(doc["color"], "#ABCDEF");
        assert_eq!(doc["name"], "X");
        assert_eq!(doc["id"], id.as_str());
    }

    #[tokio::test]
    async fn update_missing_is_not_found() {
        let store = MemoryStore::new();
        let err = store
            .update("roles", "nope", json!({"name": "x"}))
            .await
            .unwrap_err();
        assert_matches!(err, StoreError::NotFound { .. });
    }

    #[tokio::test]
    async fn delete_is_not_idempotent() {
        let store = MemoryStore::new();
        let id = store.create("events", json!({})).await.unwrap();

        store.delete("events", &id).await.unwrap();
        assert!(store.get("events", &id).await.unwrap().is_none());
        assert_matches!(
            store.delete("events", &id).await,
            Err(StoreError::NotFound { .. })
        );
    }

    #[tokio::test]
    async fn query_filters_and_preserves_insertion_order() {
        let store = MemoryStore::new();
        for (user, read) in [("u1", false), ("u2", false), ("u1", true), ("u1", false)] {
            store
                .create("notifications", json!({"user_id": user, "is_read": read}))
                .await
                .unwrap();
        }

        let all_u1 = store
            .query("notifications", &Filter::all().eq("user_id", "u1"))
            .await
            .unwrap();
        assert_eq!(all_u1.len(), 3);
        assert_eq!(all_u1[1]["is_read"], true);

        let unread_u1 = store
            .query(
                "notifications",
                &Filter::all().eq("user_id", "u1").eq("is_read", false),
            )
            .await
            .unwrap();
        assert_eq!(unread_u1.len(), 2);
    }

    #[tokio::test]
    async fn query_unknown_collection_is_empty() {
        let store = MemoryStore::new();
        assert!(store.query("nothing", &Filter::all()).await.unwrap().is_empty());
        assert!(store.get("nothing", "x").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn non_object_documents_are_rejected() {
        let store = MemoryStore::new();
        assert_matches!(
            store.create("things", json!("just a string")).await,
            Err(StoreError::InvalidDocument(_))
        );
    }
}
