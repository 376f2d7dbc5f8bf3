//! # barkeep
//!
//! Typed client for the drinks backend: a shared HTTP client plus one
//! synchronised in-memory store per entity kind (drinks, drink categories,
//! persons).
//!
//! ## Features
//!
//! - **Fetch-once stores**: the first successful fetch populates a store, later
//!   fetches are free
//! - **Server-confirmed mutations**: the local list only changes after the
//!   backend accepted the create, update or delete
//! - **Both collection shapes**: flat JSON arrays and hyperlinked (HAL) envelopes
//! - **Typed errors**: every operation returns a `Result`, nothing is swallowed
//! - **Change events**: subscribe to a store to learn when its list changed
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use barkeep::prelude::*;
//!
//! let config = ClientConfig::from_env()?;
//! let stores = AppStores::from_config(&config)?;
//!
//! stores.drinks.fetch_all().await?;
//! for drink in stores.drinks.items()? {
//!     println!("{} {}", drink.name, format_currency(drink.price));
//! }
//!
//! let beer = stores.drink_categories.find(2)?.expect("category 2");
//! let created = stores.drinks.create(Drink::new("Pils", 3.2, beer)).await?;
//! ```

pub mod client;
pub mod config;
pub mod core;
pub mod entities;
pub mod format;
pub mod routes;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        auth::{Account, AuthState, NoAuth, StaticToken, TokenProvider},
        entity::{Entity, EntityId},
        error::{ClientError, ConfigError, StoreError},
        events::{EventBus, EventEnvelope, StoreEvent},
        hal::{Link, Links, ListResponse},
    };

    // === Macros ===
    pub use crate::impl_entity;

    // === Client & config ===
    pub use crate::client::{ApiClient, ApiResponse, RequestOptions};
    pub use crate::config::{ApiConfig, CacheLocation, ClientConfig, IdentityConfig};

    // === Entities & stores ===
    pub use crate::entities::{Drink, DrinkCategory, DrinkClassification, DrinkKind, Person};
    pub use crate::storage::{
        AppStores, DrinkCategoriesStore, DrinksStore, EntityStore, LoadSummary, PersonsStore,
    };

    // === Helpers ===
    pub use crate::format::{format_currency, format_date_time, format_naive_date_time};
    pub use crate::routes::RouteInfo;
}
