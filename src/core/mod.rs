//! Core module containing fundamental traits and types shared by every store

pub mod auth;
pub mod entity;
pub mod error;
pub mod events;
pub mod hal;
pub mod pluralize;

pub use auth::{Account, AuthState, NoAuth, StaticToken, TokenProvider};
pub use entity::{Entity, EntityId};
pub use error::{ClientError, ConfigError, StoreError};
pub use events::{EventBus, EventEnvelope, StoreEvent};
pub use hal::{HalCollection, Link, Links, ListResponse};
pub use pluralize::Pluralizer;
