use anyhow::Context;
use flightbook_store::{seed_flight_inputs, seed_flights, Config, StoreBackend, StoreHandle};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Replace the flights collection with the seed schedule.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "seed_flights=info,flightbook_store=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    if config.database.backend == StoreBackend::Memory {
        tracing::warn!("In-memory backend selected; seeded flights will not outlive this process");
    }

    let store = StoreHandle::connect(&config.database)
        .await
        .context("Failed to initialize the entity store")?;

    let result = seed_flights(store.flights.as_ref(), seed_flight_inputs()).await;
    store.close().await;

    let inserted = result.context("Seeding flights failed")?;
    tracing::info!("Seeded {} flight(s)", inserted);
    Ok(())
}
