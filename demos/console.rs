//! Console demo
//!
//! Loads the configuration, fills every store from the backend and prints the
//! menu. Point it at a running backend:
//!
//! ```text
//! BARKEEP_API_BASE_URL=http://localhost:8080 RUST_LOG=barkeep=debug cargo run --example console
//! ```

use anyhow::{Context, Result};
use barkeep::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("barkeep=info")),
        )
        .init();

    let config_path =
        std::env::var("BARKEEP_CONFIG").unwrap_or_else(|_| "barkeep.yaml".to_string());
    let config =
        ClientConfig::from_env_or_file(&config_path).context("failed to load configuration")?;

    let stores = AppStores::from_config(&config)?;
    let mut events = stores.drinks.subscribe();

    let summary = stores
        .fetch_all()
        .await
        .context("failed to load data from the backend")?;
    println!(
        "Loaded {} drinks, {} categories, {} persons",
        summary.drinks, summary.drink_categories, summary.persons
    );

    if let Ok(envelope) = events.try_recv() {
        println!(
            "[{}] {} {}",
            format_date_time(&envelope.timestamp.with_timezone(&chrono::Local)),
            envelope.event.entity_type(),
            envelope.event.action()
        );
    }

    println!("\nMenu");
    for drink in stores.drinks.items()? {
        let label = drink
            .classification
            .as_ref()
            .map(|c| c.label().to_string())
            .unwrap_or_default();
        println!(
            "  {:<24} {:>12}  {}",
            drink.name,
            format_currency(drink.price),
            label
        );
    }

    println!("\nPersons");
    for person in stores.persons.items()? {
        println!("  {}", person.full_name());
    }

    Ok(())
}
