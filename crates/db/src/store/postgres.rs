//! PostgreSQL [`DocumentStore`] over the `documents` table.
//!
//! Each statement touches exactly one row, so per-document atomicity comes
//! from PostgreSQL itself. Filters are evaluated with JSONB containment
//! (`body @> $filter`), which the GIN index on `body` serves.

use async_trait::async_trait;
use serde_json::Value;

use super::{new_id, sanitize_patch, with_id, DocumentStore, Filter};
use crate::error::StoreError;
use crate::DbPool;

/// Document store persisting to PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgDocumentStore {
    pool: DbPool,
}

impl PgDocumentStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Insert a row, returning `false` when `(collection, id)` already exists.
    async fn insert(&self, collection: &str, id: &str, body: Value) -> Result<bool, StoreError> {
        let result = sqlx::query(
            "INSERT INTO documents (collection, id, body) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (collection, id) DO NOTHING",
        )
        .bind(collection)
        .bind(id)
        .bind(body)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn create(&self, collection: &str, doc: Value) -> Result<String, StoreError> {
        let id = new_id();
        let body = with_id(doc, &id)?;
        if !self.insert(collection, &id, body).await? {
            // v7 ids are unique per process; a clash means a caller reused one.
            return Err(StoreError::conflict(collection, &id));
        }
        Ok(id)
    }

    async fn create_with_id(
        &self,
        collection: &str,
        id: &str,
        doc: Value,
    ) -> Result<(), StoreError> {
        let body = with_id(doc, id)?;
        if self.insert(collection, id, body).await? {
            Ok(())
        } else {
            Err(StoreError::conflict(collection, id))
        }
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, StoreError> {
        let body = sqlx::query_scalar::<_, Value>(
            "SELECT body FROM documents WHERE collection = $1 AND id = $2",
        )
        .bind(collection)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(body)
    }

    async fn update(&self, collection: &str, id: &str, patch: Value) -> Result<(), StoreError> {
        let patch = Value::Object(sanitize_patch(patch)?);
        let result = sqlx::query(
            "UPDATE documents \
             SET body = body || $3, updated_at = NOW() \
             WHERE collection = $1 AND id = $2",
        )
        .bind(collection)
        .bind(id)
        .bind(patch)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::not_found(collection, id));
        }
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection)
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::not_found(collection, id));
        }
        Ok(())
    }

    async fn query(&self, collection: &str, filter: &Filter) -> Result<Vec<Value>, StoreError> {
        let bodies = sqlx::query_scalar::<_, Value>(
            "SELECT body FROM documents \
             WHERE collection = $1 AND body @> $2 \
             ORDER BY seq ASC",
        )
        .bind(collection)
        .bind(filter.to_containment())
        .fetch_all(&self.pool)
        .await?;
        Ok(bodies)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }
}
