//! Serde glue between typed models and raw JSON documents.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StoreError;
use crate::store::{DocumentStore, Filter};

/// Serialize `value` and insert it under a store-assigned id.
pub(crate) async fn insert<T: Serialize + ?Sized>(
    store: &dyn DocumentStore,
    collection: &str,
    value: &T,
) -> Result<String, StoreError> {
    let doc = serde_json::to_value(value)?;
    store.create(collection, doc).await
}

/// Serialize `value` and insert it under `id`.
pub(crate) async fn insert_with_id<T: Serialize + ?Sized>(
    store: &dyn DocumentStore,
    collection: &str,
    id: &str,
    value: &T,
) -> Result<(), StoreError> {
    let doc = serde_json::to_value(value)?;
    store.create_with_id(collection, id, doc).await
}

pub(crate) async fn find<T: DeserializeOwned>(
    store: &dyn DocumentStore,
    collection: &str,
    id: &str,
) -> Result<Option<T>, StoreError> {
    match store.get(collection, id).await? {
        Some(doc) => Ok(Some(serde_json::from_value(doc)?)),
        None => Ok(None),
    }
}

/// Fetch and decode every document matching `filter`, in insertion order.
pub(crate) async fn find_all<T: DeserializeOwned>(
    store: &dyn DocumentStore,
    collection: &str,
    filter: &Filter,
) -> Result<Vec<T>, StoreError> {
    store
        .query(collection, filter)
        .await?
        .into_iter()
        .map(|doc| serde_json::from_value(doc).map_err(StoreError::from))
        .collect()
}

/// Shallow-merge the serialized `patch` into the document, then re-read it.
pub(crate) async fn patch<P, T>(
    store: &dyn DocumentStore,
    collection: &str,
    id: &str,
    patch: &P,
) -> Result<T, StoreError>
where
    P: Serialize + ?Sized,
    T: DeserializeOwned,
{
    let doc = serde_json::to_value(patch)?;
    store.update(collection, id, doc).await?;
    find(store, collection, id)
        .await?
        .ok_or_else(|| StoreError::not_found(collection, id))
}
