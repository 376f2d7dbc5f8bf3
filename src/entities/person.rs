use crate::core::entity::EntityId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A guest or staff member drinks are booked on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,

    pub first_name: String,

    pub last_name: String,

    /// Any further attributes the backend sends, kept verbatim
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

crate::impl_entity!(Person, "person");

impl Person {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            attributes: Map::new(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
