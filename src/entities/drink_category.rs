use crate::core::entity::EntityId;
use crate::core::hal::Links;
use serde::{Deserialize, Serialize};

/// A category drinks are sorted into, e.g. "Beer" or "Soft drink"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrinkCategory {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,

    pub category: String,

    pub alcoholic: bool,

    /// Present when the backend speaks hyperlinked resources
    #[serde(rename = "_links", default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
}

crate::impl_entity!(DrinkCategory, "drink_category");

impl DrinkCategory {
    pub fn new(category: impl Into<String>, alcoholic: bool) -> Self {
        Self {
            id: None,
            category: category.into(),
            alcoholic,
            links: None,
        }
    }

    /// Canonical resource path of this category, if the backend provided one
    pub fn self_href(&self) -> Option<&str> {
        self.links.as_ref().and_then(Links::self_href)
    }
}
