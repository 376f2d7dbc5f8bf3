//! Records exchanged with the backend

mod drink;
mod drink_category;
mod person;

pub use drink::{Drink, DrinkClassification, DrinkKind};
pub use drink_category::DrinkCategory;
pub use person::Person;
