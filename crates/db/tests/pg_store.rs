//! PostgreSQL document store tests.
//!
//! These need a live database and are ignored by default. Run with
//! `DATABASE_URL=postgres://... cargo test -p campus-db -- --ignored`.

use assert_matches::assert_matches;
use campus_db::store::{collections, DocumentStore, Filter, PgDocumentStore};
use campus_db::StoreError;
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn create_get_update_delete(pool: PgPool) {
    let store = PgDocumentStore::new(pool);

    let id = store
        .create(collections::ROLES, json!({"name": "Alumni", "color": "#112233"}))
        .await
        .unwrap();
    let doc = store.get(collections::ROLES, &id).await.unwrap().unwrap();
    assert_eq!(doc["id"], id.as_str());

    store
        .update(collections::ROLES, &id, json!({"color": "#000000", "id": "hijack"}))
        .await
        .unwrap();
    let doc = store.get(collections::ROLES, &id).await.unwrap().unwrap();
    assert_eq!(doc["name"], "Alumni");
    assert_eq!(doc["color"], "#000000");
    assert_eq!(doc["id"], id.as_str());

    store.delete(collections::ROLES, &id).await.unwrap();
    assert_matches!(
        store.delete(collections::ROLES, &id).await,
        Err(StoreError::NotFound { .. })
    );
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn create_with_id_conflicts(pool: PgPool) {
    let store = PgDocumentStore::new(pool);
    store
        .create_with_id(collections::USER_PREFERENCES, "u1", json!({"user_id": "u1"}))
        .await
        .unwrap();
    assert_matches!(
        store
            .create_with_id(collections::USER_PREFERENCES, "u1", json!({"user_id": "u1"}))
            .await,
        Err(StoreError::Conflict { .. })
    );
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn query_uses_containment_in_insertion_order(pool: PgPool) {
    let store = PgDocumentStore::new(pool);
    for (user, roles) in [("u1", json!(["general", "hnd"])), ("u2", json!(["masters"])), ("u3", json!(["hnd"]))] {
        store
            .create_with_id(
                collections::USER_PREFERENCES,
                user,
                json!({"user_id": user, "subscribed_roles": roles}),
            )
            .await
            .unwrap();
    }

    let docs = store
        .query(
            collections::USER_PREFERENCES,
            &Filter::all().contains("subscribed_roles", "hnd"),
        )
        .await
        .unwrap();
    let users: Vec<_> = docs.iter().map(|d| d["user_id"].as_str().unwrap()).collect();
    assert_eq!(users, ["u1", "u3"]);
}
