//! Generic entity store synchronised with a backend collection

use crate::client::{ApiClient, ApiResponse};
use crate::core::entity::{Entity, EntityId};
use crate::core::error::StoreError;
use crate::core::events::{EventBus, EventEnvelope, StoreEvent};
use crate::core::hal::ListResponse;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::sync::broadcast;

/// In-memory list of one entity kind, kept in step with the backend
///
/// The list only changes after the backend has confirmed a mutation: it is
/// replaced by a successful fetch, appended to by a successful create,
/// patched by a successful update and shrunk by a successful delete. A failed
/// call leaves it untouched and hands the error back to the caller.
///
/// Clones share the same list, flag and event bus.
#[derive(Debug, Clone)]
pub struct EntityStore<T: Entity> {
    client: ApiClient,
    items: Arc<RwLock<Vec<T>>>,
    loading: Arc<AtomicUsize>,
    events: EventBus,
}

/// Counts one fetch in flight until dropped, however the fetch finishes
struct LoadingGuard<'a>(&'a AtomicUsize);

impl<'a> LoadingGuard<'a> {
    fn start(in_flight: &'a AtomicUsize) -> Self {
        in_flight.fetch_add(1, Ordering::SeqCst);
        Self(in_flight)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl<T: Entity> EntityStore<T> {
    /// Create an empty store talking to the backend through `client`
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            items: Arc::new(RwLock::new(Vec::new())),
            loading: Arc::new(AtomicUsize::new(0)),
            events: EventBus::default(),
        }
    }

    // === Read path ===

    /// Snapshot of the current list, in backend order
    pub fn items(&self) -> Result<Vec<T>, StoreError> {
        Ok(self.read()?.clone())
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.read()?.is_empty())
    }

    /// Whether at least one fetch is in flight
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst) > 0
    }

    pub fn find(&self, id: EntityId) -> Result<Option<T>, StoreError> {
        Ok(self.read()?.iter().find(|item| item.id() == Some(id)).cloned())
    }

    /// Receive a [`StoreEvent`] after every list mutation
    pub fn subscribe(&self) -> broadcast::Receiver<EventEnvelope> {
        self.events.subscribe()
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    // === Operations ===

    /// Populate the list from the backend, once.
    ///
    /// A non-empty list is returned as is without calling the backend; there
    /// is no staleness check. Returns the number of records held.
    pub async fn fetch_all(&self) -> Result<usize, StoreError> {
        let held = self.len()?;
        if held > 0 {
            tracing::debug!(
                entity_type = T::resource_name_singular(),
                count = held,
                "Already loaded, skipping fetch"
            );
            return Ok(held);
        }

        let result = {
            let _loading = LoadingGuard::start(&self.loading);
            self.load().await
        };
        self.logged("fetch", result)
    }

    /// Create `record` on the backend and append the backend's copy
    pub async fn create(&self, record: T) -> Result<T, StoreError> {
        let result = self.create_inner(&record).await;
        self.logged("create", result)
    }

    /// Update `record` on the backend and replace the local entry with the backend's copy.
    ///
    /// A record that is not held locally is sent anyway; the list stays as it is.
    pub async fn update(&self, record: T) -> Result<T, StoreError> {
        let result = self.update_inner(&record).await;
        self.logged("update", result)
    }

    /// Delete `record` on the backend and drop it from the list
    pub async fn delete(&self, record: &T) -> Result<(), StoreError> {
        let result = self.delete_inner(record).await;
        self.logged("delete", result)
    }

    /// Create when `record` has no identifier yet, update otherwise
    pub async fn save(&self, record: T) -> Result<T, StoreError> {
        if record.is_persisted() {
            self.update(record).await
        } else {
            self.create(record).await
        }
    }

    // === Internals ===

    async fn load(&self) -> Result<usize, StoreError> {
        let response = self.client.get(T::resource_name()).await?;
        let body: ListResponse<T> = response.json()?;
        let items = body.into_items(T::embedded_key())?;

        let count = {
            let mut list = self.write()?;
            *list = dedup_by_id(items);
            list.len()
        };

        tracing::info!(
            entity_type = T::resource_name_singular(),
            count,
            "Loaded from backend"
        );
        self.events.publish(StoreEvent::Loaded {
            entity_type: T::resource_name_singular().to_string(),
            count,
        });
        Ok(count)
    }

    async fn create_inner(&self, record: &T) -> Result<T, StoreError> {
        let body = self.body_of(record)?;
        let response = self.client.post(T::resource_name(), &body).await?;
        let created = self.created_copy(response).await?;

        {
            let mut list = self.write()?;
            match position_of(&list, created.id()) {
                Some(idx) => list[idx] = created.clone(),
                None => list.push(created.clone()),
            }
        }

        self.events.publish(StoreEvent::Created {
            entity_type: T::resource_name_singular().to_string(),
            id: created.id(),
        });
        Ok(created)
    }

    async fn update_inner(&self, record: &T) -> Result<T, StoreError> {
        let id = self.require_id(record)?;
        let body = self.body_of(record)?;
        let response = self.client.put(&self.item_path(id), &body).await?;
        let updated = if response.is_empty() {
            record.clone()
        } else {
            response.json::<T>()?
        };

        let replaced = {
            let mut list = self.write()?;
            match position_of(&list, Some(id)) {
                Some(idx) => {
                    list[idx] = updated.clone();
                    // The backend may answer with another identifier; the
                    // replaced slot wins over any older entry holding it.
                    if let Some(new_id) = updated.id().filter(|new_id| *new_id != id) {
                        let mut position = 0;
                        list.retain(|item| {
                            let keep = position == idx || item.id() != Some(new_id);
                            position += 1;
                            keep
                        });
                    }
                    true
                }
                None => false,
            }
        };

        if replaced {
            self.events.publish(StoreEvent::Updated {
                entity_type: T::resource_name_singular().to_string(),
                id,
            });
        } else {
            tracing::warn!(
                entity_type = T::resource_name_singular(),
                id,
                "Updated record is not held locally, list unchanged"
            );
        }
        Ok(updated)
    }

    async fn delete_inner(&self, record: &T) -> Result<(), StoreError> {
        let id = self.require_id(record)?;
        self.client.delete(&self.item_path(id)).await?;

        let removed = {
            let mut list = self.write()?;
            let before = list.len();
            list.retain(|item| item.id() != Some(id));
            list.len() < before
        };

        if removed {
            self.events.publish(StoreEvent::Deleted {
                entity_type: T::resource_name_singular().to_string(),
                id,
            });
        }
        Ok(())
    }

    /// The backend's copy of a created record: the response body, or the
    /// resource behind `Location` when the backend answered without a body
    async fn created_copy(&self, response: ApiResponse) -> Result<T, StoreError> {
        if !response.is_empty() {
            return Ok(response.json()?);
        }
        match response.location() {
            Some(location) => {
                let url = self.client.resolve(T::resource_name(), location)?;
                Ok(self.client.get(&url).await?.json()?)
            }
            None => Ok(response.json()?),
        }
    }

    fn body_of(&self, record: &T) -> Result<serde_json::Value, StoreError> {
        record.request_body().map_err(|source| StoreError::Serialize {
            entity_type: T::resource_name_singular().to_string(),
            source,
        })
    }

    fn require_id(&self, record: &T) -> Result<EntityId, StoreError> {
        record.id().ok_or_else(|| StoreError::MissingId {
            entity_type: T::resource_name_singular().to_string(),
        })
    }

    fn item_path(&self, id: EntityId) -> String {
        format!("{}/{}", T::resource_name(), id)
    }

    fn logged<R>(&self, operation: &str, result: Result<R, StoreError>) -> Result<R, StoreError> {
        if let Err(err) = &result {
            tracing::error!(
                entity_type = T::resource_name_singular(),
                operation,
                code = err.error_code(),
                error = %err,
                "Store operation failed"
            );
        }
        result
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<T>>, StoreError> {
        self.items
            .read()
            .map_err(|e| StoreError::LockPoisoned(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<T>>, StoreError> {
        self.items
            .write()
            .map_err(|e| StoreError::LockPoisoned(format!("Failed to acquire write lock: {}", e)))
    }
}

fn position_of<T: Entity>(list: &[T], id: Option<EntityId>) -> Option<usize> {
    let id = id?;
    list.iter().position(|item| item.id() == Some(id))
}

/// Keep the first record for every identifier; records without one are kept as is
fn dedup_by_id<T: Entity>(items: Vec<T>) -> Vec<T> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| item.id().is_none_or(|id| seen.insert(id)))
        .collect()
}
