//! Hyperlinked resource representations
//!
//! Depending on its revision the backend answers a collection GET either with a
//! flat JSON array or with a HAL envelope:
//!
//! ```text
//! { "_embedded": { "drinkCategories": [ ... ] }, "_links": { "self": { "href": "..." } } }
//! ```
//!
//! [`ListResponse`] models both shapes explicitly and [`ListResponse::into_items`]
//! is the single place where the envelope is unwrapped.

use crate::core::error::StoreError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single hyperlink
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub href: String,
}

impl Link {
    pub fn new(href: impl Into<String>) -> Self {
        Self { href: href.into() }
    }
}

/// The `_links` object of a hyperlinked resource
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Links {
    /// Canonical location of the resource itself
    #[serde(rename = "self", skip_serializing_if = "Option::is_none")]
    pub self_link: Option<Link>,

    /// Every other relation, keyed by relation name
    #[serde(flatten)]
    pub others: HashMap<String, Link>,
}

impl Links {
    /// Links carrying only a self reference
    pub fn with_self(href: impl Into<String>) -> Self {
        Self {
            self_link: Some(Link::new(href)),
            others: HashMap::new(),
        }
    }

    pub fn self_href(&self) -> Option<&str> {
        self.self_link.as_ref().map(|l| l.href.as_str())
    }

    pub fn get(&self, rel: &str) -> Option<&Link> {
        match rel {
            "self" => self.self_link.as_ref(),
            _ => self.others.get(rel),
        }
    }
}

/// HAL collection envelope
#[derive(Debug, Clone, Deserialize)]
pub struct HalCollection<T> {
    #[serde(rename = "_embedded")]
    pub embedded: HashMap<String, Vec<T>>,

    #[serde(rename = "_links", default)]
    pub links: Option<Links>,
}

/// The two collection response shapes the backend produces
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListResponse<T> {
    /// A plain JSON array
    Flat(Vec<T>),

    /// A hyperlinked envelope nesting the collection under its entity key
    Embedded(HalCollection<T>),
}

impl<T> ListResponse<T> {
    /// Extract the records, looking up `key` when the body is an envelope
    pub fn into_items(self, key: &str) -> Result<Vec<T>, StoreError> {
        match self {
            ListResponse::Flat(items) => Ok(items),
            ListResponse::Embedded(mut envelope) => {
                envelope
                    .embedded
                    .remove(key)
                    .ok_or_else(|| StoreError::EnvelopeKeyMissing {
                        key: key.to_string(),
                    })
            }
        }
    }

    pub fn is_envelope(&self) -> bool {
        matches!(self, ListResponse::Embedded(_))
    }
}
