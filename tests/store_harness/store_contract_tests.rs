//! Macro-generated test suite validating the `EntityStore<T>` contract for one entity kind.
//!
//! The `store_contract_tests!` macro generates a test module that runs an
//! `EntityStore<T>` against a [`MockBackend`](super::MockBackend) and checks
//! how the local list follows the backend's answers.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod store_harness;
//!
//! use store_harness::*;
//!
//! store_contract_tests!(Drink);
//! ```
//!
//! # Generated Tests
//!
//! ## Fetch
//! - `test_fetch_all_flat_array` — a flat array becomes the list as is
//! - `test_fetch_all_hal_envelope` — the embedded collection becomes the list
//! - `test_fetch_all_only_once` — a populated store issues no further GET
//! - `test_fetch_all_failure` — a 500 leaves the list empty and is reported
//! - `test_fetch_all_unreachable_backend` — transport errors are reported as such
//!
//! ## Mutations
//! - `test_create_appends_server_copy` — the identifier comes from the response
//! - `test_create_failure` — a 500 appends nothing
//! - `test_update_replaces_in_place` — one entry replaced, neighbours untouched
//! - `test_update_unknown_record` — no local match, no mutation
//! - `test_update_answer_with_held_id_keeps_ids_unique` — never two entries per id
//! - `test_update_failure` — a 500 leaves the list identical
//! - `test_delete_no_content` / `test_delete_ok` — 204 and 200 both remove
//! - `test_delete_unknown_record` — unknown id is a no-op
//! - `test_delete_failure` — a 500 leaves the list identical
//! - `test_save_chooses_create_or_update` — POST without id, PUT with id
//! - `test_mutations_publish_events` — subscribers see every list change

/// Generate the `EntityStore<$entity>` contract test suite.
///
/// `$entity` must implement [`StoreFixture`](super::StoreFixture).
#[macro_export]
macro_rules! store_contract_tests {
    ($entity:ty) => {
        mod store_contract {
            use super::*;
            use axum::http::{Method, StatusCode};
            use barkeep::prelude::*;
            use serde_json::json;

            type T = $entity;

            fn samples(ids: &[EntityId]) -> Vec<T> {
                ids.iter()
                    .map(|id| T::sample(Some(*id), *id as u32))
                    .collect()
            }

            /// Store already populated with `items` through a flat-array fetch
            async fn loaded(backend: &MockBackend, items: &[T]) -> EntityStore<T> {
                let body = serde_json::Value::Array(items.iter().map(to_json).collect());
                backend.on(Method::GET, &collection::<T>(), StatusCode::OK, body);

                let store = backend.store::<T>();
                store.fetch_all().await.unwrap();
                store
            }

            // ==================================================================
            // Fetch
            // ==================================================================

            #[tokio::test]
            async fn test_fetch_all_flat_array() {
                let backend = MockBackend::start().await;
                let items = samples(&[1, 2]);
                backend.on(
                    Method::GET,
                    &collection::<T>(),
                    StatusCode::OK,
                    json!([to_json(&items[0]), to_json(&items[1])]),
                );

                let store = backend.store::<T>();
                let count = store.fetch_all().await.unwrap();

                assert_eq!(count, 2);
                assert_eq!(store.items().unwrap(), items);
                assert!(!store.is_loading());
            }

            #[tokio::test]
            async fn test_fetch_all_hal_envelope() {
                let backend = MockBackend::start().await;
                let items = samples(&[3, 4, 5]);
                let mut embedded = serde_json::Map::new();
                embedded.insert(
                    T::embedded_key().to_string(),
                    json!(items.iter().map(to_json).collect::<Vec<_>>()),
                );
                backend.on(
                    Method::GET,
                    &collection::<T>(),
                    StatusCode::OK,
                    json!({
                        "_embedded": embedded,
                        "_links": { "self": { "href": backend.base_url() + &collection::<T>() } }
                    }),
                );

                let store = backend.store::<T>();
                assert_eq!(store.fetch_all().await.unwrap(), 3);
                assert_eq!(store.items().unwrap(), items);
            }

            #[tokio::test]
            async fn test_fetch_all_only_once() {
                let backend = MockBackend::start().await;
                let store = loaded(&backend, &samples(&[1, 2])).await;
                let calls_before = backend.call_count();

                assert_eq!(store.fetch_all().await.unwrap(), 2);
                assert_eq!(store.fetch_all().await.unwrap(), 2);

                assert_eq!(backend.call_count(), calls_before);
                assert_eq!(backend.calls_to(Method::GET, &collection::<T>()).len(), 1);
            }

            #[tokio::test]
            async fn test_fetch_all_failure() {
                let backend = MockBackend::start().await;
                backend.on(
                    Method::GET,
                    &collection::<T>(),
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "boom" }),
                );

                let store = backend.store::<T>();
                let err = store.fetch_all().await.unwrap_err();

                assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
                assert!(store.is_empty().unwrap());
                assert!(!store.is_loading());
            }

            #[tokio::test]
            async fn test_fetch_all_unreachable_backend() {
                let client = ApiClient::with_base_url(&unreachable_base_url().await).unwrap();
                let store = EntityStore::<T>::new(client);

                let err = store.fetch_all().await.unwrap_err();

                assert!(err.is_transport());
                assert_eq!(err.status(), None);
                assert!(store.is_empty().unwrap());
            }

            // ==================================================================
            // Create
            // ==================================================================

            #[tokio::test]
            async fn test_create_appends_server_copy() {
                let backend = MockBackend::start().await;
                let server_copy = T::sample(Some(42), 1);
                backend.on(
                    Method::POST,
                    &collection::<T>(),
                    StatusCode::CREATED,
                    to_json(&server_copy),
                );

                let store = backend.store::<T>();
                let created = store.create(T::sample(None, 1)).await.unwrap();

                assert_eq!(created.id(), Some(42));
                assert_eq!(store.items().unwrap(), vec![server_copy]);

                let posted = backend.calls_to(Method::POST, &collection::<T>());
                assert_eq!(posted.len(), 1);
                assert!(posted[0].body.as_ref().unwrap().get("id").is_none());
            }

            #[tokio::test]
            async fn test_create_failure() {
                let backend = MockBackend::start().await;
                backend.on(
                    Method::POST,
                    &collection::<T>(),
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "boom" }),
                );

                let store = backend.store::<T>();
                let err = store.create(T::sample(None, 1)).await.unwrap_err();

                assert_eq!(err.error_code(), "BACKEND_REJECTED");
                assert!(store.is_empty().unwrap());
            }

            // ==================================================================
            // Update
            // ==================================================================

            #[tokio::test]
            async fn test_update_replaces_in_place() {
                let backend = MockBackend::start().await;
                let items = samples(&[1, 2, 3]);
                let store = loaded(&backend, &items).await;

                let server_copy = items[1].modified();
                backend.on(Method::PUT, &item::<T>(2), StatusCode::OK, to_json(&server_copy));

                let updated = store.update(items[1].modified()).await.unwrap();

                assert_eq!(updated, server_copy);
                assert_eq!(
                    store.items().unwrap(),
                    vec![items[0].clone(), server_copy, items[2].clone()]
                );
            }

            #[tokio::test]
            async fn test_update_unknown_record() {
                let backend = MockBackend::start().await;
                let items = samples(&[1]);
                let store = loaded(&backend, &items).await;

                let stranger = T::sample(Some(9), 9);
                backend.on(Method::PUT, &item::<T>(9), StatusCode::OK, to_json(&stranger));

                store.update(stranger).await.unwrap();

                assert_eq!(store.items().unwrap(), items);
            }

            #[tokio::test]
            async fn test_update_answer_with_held_id_keeps_ids_unique() {
                let backend = MockBackend::start().await;
                let items = samples(&[1, 2, 3]);
                let store = loaded(&backend, &items).await;

                let answer = T::sample(Some(2), 7);
                backend.on(Method::PUT, &item::<T>(1), StatusCode::OK, to_json(&answer));

                store.update(items[0].modified()).await.unwrap();

                assert_eq!(store.items().unwrap(), vec![answer, items[2].clone()]);
            }

            #[tokio::test]
            async fn test_update_failure() {
                let backend = MockBackend::start().await;
                let items = samples(&[1, 2]);
                let store = loaded(&backend, &items).await;
                backend.on(
                    Method::PUT,
                    &item::<T>(1),
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({}),
                );

                assert!(store.update(items[0].modified()).await.is_err());
                assert_eq!(store.items().unwrap(), items);
            }

            // ==================================================================
            // Delete
            // ==================================================================

            #[tokio::test]
            async fn test_delete_no_content() {
                let backend = MockBackend::start().await;
                let items = samples(&[1]);
                let store = loaded(&backend, &items).await;
                backend.on_empty(Method::DELETE, &item::<T>(1), StatusCode::NO_CONTENT);

                store.delete(&items[0]).await.unwrap();

                assert!(store.is_empty().unwrap());
            }

            #[tokio::test]
            async fn test_delete_ok() {
                let backend = MockBackend::start().await;
                let items = samples(&[1, 2, 3]);
                let store = loaded(&backend, &items).await;
                backend.on(Method::DELETE, &item::<T>(2), StatusCode::OK, json!({}));

                store.delete(&items[1]).await.unwrap();

                assert_eq!(store.len().unwrap(), 2);
                assert_eq!(
                    store.items().unwrap(),
                    vec![items[0].clone(), items[2].clone()]
                );
            }

            #[tokio::test]
            async fn test_delete_unknown_record() {
                let backend = MockBackend::start().await;
                let items = samples(&[1, 2]);
                let store = loaded(&backend, &items).await;
                backend.on_empty(Method::DELETE, &item::<T>(7), StatusCode::NO_CONTENT);

                store.delete(&T::sample(Some(7), 7)).await.unwrap();

                assert_eq!(store.items().unwrap(), items);
            }

            #[tokio::test]
            async fn test_delete_failure() {
                let backend = MockBackend::start().await;
                let items = samples(&[1, 2]);
                let store = loaded(&backend, &items).await;
                backend.on(
                    Method::DELETE,
                    &item::<T>(1),
                    StatusCode::CONFLICT,
                    json!({ "error": "still referenced" }),
                );

                let err = store.delete(&items[0]).await.unwrap_err();

                assert_eq!(err.status(), Some(StatusCode::CONFLICT));
                assert_eq!(store.items().unwrap(), items);
            }

            // ==================================================================
            // Save & events
            // ==================================================================

            #[tokio::test]
            async fn test_save_chooses_create_or_update() {
                let backend = MockBackend::start().await;
                let created = T::sample(Some(11), 1);
                backend.on(Method::POST, &collection::<T>(), StatusCode::CREATED, to_json(&created));
                backend.on(
                    Method::PUT,
                    &item::<T>(11),
                    StatusCode::OK,
                    to_json(&created.modified()),
                );

                let store = backend.store::<T>();
                store.save(T::sample(None, 1)).await.unwrap();
                store.save(created.modified()).await.unwrap();

                assert_eq!(backend.calls_to(Method::POST, &collection::<T>()).len(), 1);
                assert_eq!(backend.calls_to(Method::PUT, &item::<T>(11)).len(), 1);
                assert_eq!(store.items().unwrap(), vec![created.modified()]);
            }

            #[tokio::test]
            async fn test_mutations_publish_events() {
                let backend = MockBackend::start().await;
                let items = samples(&[1]);
                let store = backend.store::<T>();
                let mut events = store.subscribe();

                backend.on(
                    Method::GET,
                    &collection::<T>(),
                    StatusCode::OK,
                    json!([to_json(&items[0])]),
                );
                backend.on_empty(Method::DELETE, &item::<T>(1), StatusCode::NO_CONTENT);

                store.fetch_all().await.unwrap();
                store.delete(&items[0]).await.unwrap();

                let loaded = events.recv().await.unwrap();
                assert_eq!(loaded.event.action(), "loaded");
                assert_eq!(loaded.event.entity_type(), T::resource_name_singular());

                let deleted = events.recv().await.unwrap();
                assert_eq!(deleted.event.action(), "deleted");
                assert_eq!(deleted.event.entity_id(), Some(1));
            }
        }
    };
}
