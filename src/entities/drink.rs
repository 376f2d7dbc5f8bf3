use crate::core::entity::EntityId;
use crate::core::hal::Links;
use crate::entities::DrinkCategory;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Wire name of a drink's category, both as field and as link relation
const CATEGORY_REL: &str = "drinkCategory";

/// Inlined drink kind used by the older backend schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrinkKind {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    pub name: String,
    pub alcoholic: bool,
}

/// How a drink is classified, depending on the backend schema revision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrinkClassification {
    /// Reference to a category resource
    #[serde(rename = "drinkCategory")]
    Category(DrinkCategory),

    /// Inlined kind
    #[serde(rename = "drinkKind")]
    Kind(DrinkKind),
}

impl DrinkClassification {
    pub fn is_alcoholic(&self) -> bool {
        match self {
            DrinkClassification::Category(c) => c.alcoholic,
            DrinkClassification::Kind(k) => k.alcoholic,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            DrinkClassification::Category(c) => &c.category,
            DrinkClassification::Kind(k) => &k.name,
        }
    }
}

/// A drink on the menu
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drink {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,

    pub name: String,

    /// Price in euros
    pub price: f64,

    /// Missing when the backend only links the category instead of embedding it
    #[serde(flatten)]
    pub classification: Option<DrinkClassification>,

    #[serde(rename = "_links", default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
}

crate::impl_entity!(Drink, "drink", {
    /// A category carrying a self link is sent as that link, so the backend
    /// associates the existing category instead of receiving a nested copy.
    /// A drink that only links its category sends that link back, otherwise
    /// a PUT would clear the association.
    fn request_body(&self) -> Result<Value, serde_json::Error> {
        let mut payload = serde_json::to_value(self)?;
        if let (Some(href), Some(fields)) = (self.category_href(), payload.as_object_mut()) {
            fields.insert(CATEGORY_REL.to_string(), Value::String(href.to_string()));
        }
        Ok(payload)
    }
});

impl Drink {
    pub fn new(name: impl Into<String>, price: f64, category: DrinkCategory) -> Self {
        Self {
            id: None,
            name: name.into(),
            price,
            classification: Some(DrinkClassification::Category(category)),
            links: None,
        }
    }

    pub fn with_kind(name: impl Into<String>, price: f64, kind: DrinkKind) -> Self {
        Self {
            id: None,
            name: name.into(),
            price,
            classification: Some(DrinkClassification::Kind(kind)),
            links: None,
        }
    }

    pub fn category(&self) -> Option<&DrinkCategory> {
        match &self.classification {
            Some(DrinkClassification::Category(c)) => Some(c),
            _ => None,
        }
    }

    /// Canonical path of the drink's category, when the backend gave one
    pub fn category_href(&self) -> Option<&str> {
        match &self.classification {
            Some(DrinkClassification::Category(category)) => category.self_href(),
            Some(DrinkClassification::Kind(_)) => None,
            None => self
                .links
                .as_ref()
                .and_then(|links| links.get(CATEGORY_REL))
                .map(|link| link.href.as_str()),
        }
    }

    pub fn is_alcoholic(&self) -> bool {
        self.classification
            .as_ref()
            .is_some_and(DrinkClassification::is_alcoholic)
    }
}
