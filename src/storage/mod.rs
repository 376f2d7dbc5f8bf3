//! Entity stores synchronised with the backend

pub mod app_stores;
pub mod entity_store;

pub use app_stores::{AppStores, DrinkCategoriesStore, DrinksStore, LoadSummary, PersonsStore};
pub use entity_store::EntityStore;
