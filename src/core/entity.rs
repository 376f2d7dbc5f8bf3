//! Entity trait defining what a store needs to know about a record type

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

/// Identifier assigned by the backend
pub type EntityId = i64;

/// Base trait for every record kind held by an [`EntityStore`](crate::storage::EntityStore).
///
/// A record without an identifier has not been persisted yet. The store uses
/// that distinction to choose between create and update in `save`.
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// The singular resource name (e.g., "drink", "drink_category")
    fn resource_name_singular() -> &'static str;

    /// The collection path segment used in URLs (e.g., "drinks", "drink-categories")
    fn resource_name() -> &'static str;

    /// Key of the embedded collection in a hyperlinked envelope (e.g., "drinkCategories")
    fn embedded_key() -> &'static str;

    /// Backend identifier, `None` until the record has been created
    fn id(&self) -> Option<EntityId>;

    /// JSON body sent when creating or updating this record.
    ///
    /// Defaults to the record itself. Entities that reference other resources
    /// override this to send the referenced resource's path instead.
    fn request_body(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// Whether the backend already knows this record
    fn is_persisted(&self) -> bool {
        self.id().is_some()
    }
}

/// Implements [`Entity`] for a struct with an `id: Option<EntityId>` field,
/// deriving the resource names from the singular name.
///
/// ```rust,ignore
/// impl_entity!(DrinkCategory, "drink_category");
/// ```
#[macro_export]
macro_rules! impl_entity {
    ($type:ident, $singular:expr) => {
        $crate::impl_entity!($type, $singular, {});
    };
    ($type:ident, $singular:expr, { $($extra:tt)* }) => {
        impl $crate::core::entity::Entity for $type {
            fn resource_name_singular() -> &'static str {
                $singular
            }

            fn resource_name() -> &'static str {
                use std::sync::OnceLock;
                static PATH: OnceLock<String> = OnceLock::new();
                PATH.get_or_init(|| {
                    $crate::core::pluralize::Pluralizer::collection_path($singular)
                })
                .as_str()
            }

            fn embedded_key() -> &'static str {
                use std::sync::OnceLock;
                static KEY: OnceLock<String> = OnceLock::new();
                KEY.get_or_init(|| $crate::core::pluralize::Pluralizer::embedded_key($singular))
                    .as_str()
            }

            fn id(&self) -> Option<$crate::core::entity::EntityId> {
                self.id
            }

            $($extra)*
        }
    };
}
