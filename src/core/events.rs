//! Change notifications for entity stores
//!
//! Stores publish a [`StoreEvent`] after every successful list mutation.
//! Views subscribe to the bus and re-read the store snapshot when an event
//! arrives; they never mutate the list themselves.
//!
//! ```text
//! EntityStore::create() ──▶ EventBus::publish() ──▶ broadcast channel ──▶ view subscribers
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! let mut rx = stores.drinks.subscribe();
//!
//! stores.drinks.create(drink).await?;
//!
//! if let Ok(envelope) = rx.recv().await {
//!     println!("{} {}", envelope.event.entity_type(), envelope.event.action());
//! }
//! ```

use crate::core::entity::EntityId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;

/// A mutation applied to a store's list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum StoreEvent {
    /// The list was populated from the backend
    Loaded { entity_type: String, count: usize },
    /// A record returned by the backend was appended
    Created {
        entity_type: String,
        id: Option<EntityId>,
    },
    /// A record was replaced by the backend's copy
    Updated { entity_type: String, id: EntityId },
    /// A record was removed
    Deleted { entity_type: String, id: EntityId },
}

impl StoreEvent {
    pub fn entity_type(&self) -> &str {
        match self {
            StoreEvent::Loaded { entity_type, .. }
            | StoreEvent::Created { entity_type, .. }
            | StoreEvent::Updated { entity_type, .. }
            | StoreEvent::Deleted { entity_type, .. } => entity_type,
        }
    }

    /// Identifier of the affected record, if the event concerns a single record
    pub fn entity_id(&self) -> Option<EntityId> {
        match self {
            StoreEvent::Loaded { .. } => None,
            StoreEvent::Created { id, .. } => *id,
            StoreEvent::Updated { id, .. } | StoreEvent::Deleted { id, .. } => Some(*id),
        }
    }

    pub fn action(&self) -> &'static str {
        match self {
            StoreEvent::Loaded { .. } => "loaded",
            StoreEvent::Created { .. } => "created",
            StoreEvent::Updated { .. } => "updated",
            StoreEvent::Deleted { .. } => "deleted",
        }
    }
}

/// Event plus delivery metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Monotonic per-bus sequence number
    pub sequence: u64,
    pub timestamp: DateTime<Utc>,
    pub event: StoreEvent,
}

/// Broadcast-based event bus, one per store
///
/// Cheap to clone; clones share the same channel.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<EventEnvelope>,
    sequence: Arc<AtomicU64>,
}

impl EventBus {
    /// Create a bus buffering up to `capacity` events for slow receivers
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            sequence: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Publish an event; returns the number of receivers it reached
    pub fn publish(&self, event: StoreEvent) -> usize {
        let envelope = EventEnvelope {
            sequence: self.sequence.fetch_add(1, Ordering::Relaxed),
            timestamp: Utc::now(),
            event,
        };
        // send() only fails when nobody listens
        self.sender.send(envelope).unwrap_or(0)
    }

    /// Receive every event published after this call
    pub fn subscribe(&self) -> broadcast::Receiver<EventEnvelope> {
        self.sender.subscribe()
    }

    /// Same as [`subscribe`](Self::subscribe), as a `Stream`
    pub fn stream(&self) -> BroadcastStream<EventEnvelope> {
        BroadcastStream::new(self.sender.subscribe())
    }

    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}
