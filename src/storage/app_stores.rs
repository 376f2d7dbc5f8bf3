//! Composition root holding one store per entity kind

use crate::client::ApiClient;
use crate::config::ClientConfig;
use crate::core::error::{ClientError, StoreError};
use crate::entities::{Drink, DrinkCategory, Person};
use crate::storage::EntityStore;

pub type DrinksStore = EntityStore<Drink>;
pub type DrinkCategoriesStore = EntityStore<DrinkCategory>;
pub type PersonsStore = EntityStore<Person>;

/// Every store of the application, sharing one [`ApiClient`]
///
/// Built once by the application and handed to whatever needs a store.
/// Tests build their own instance against a mock backend.
#[derive(Debug, Clone)]
pub struct AppStores {
    pub client: ApiClient,
    pub drinks: DrinksStore,
    pub drink_categories: DrinkCategoriesStore,
    pub persons: PersonsStore,
}

/// Record counts after [`AppStores::fetch_all`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadSummary {
    pub drinks: usize,
    pub drink_categories: usize,
    pub persons: usize,
}

impl AppStores {
    pub fn new(client: ApiClient) -> Self {
        Self {
            drinks: EntityStore::new(client.clone()),
            drink_categories: EntityStore::new(client.clone()),
            persons: EntityStore::new(client.clone()),
            client,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        Ok(Self::new(ApiClient::new(&config.api)?))
    }

    /// Populate every store concurrently; the first failure is returned
    /// once all three fetches have settled
    pub async fn fetch_all(&self) -> Result<LoadSummary, StoreError> {
        let (drinks, drink_categories, persons) = futures::join!(
            self.drinks.fetch_all(),
            self.drink_categories.fetch_all(),
            self.persons.fetch_all(),
        );

        Ok(LoadSummary {
            drinks: drinks?,
            drink_categories: drink_categories?,
            persons: persons?,
        })
    }
}
