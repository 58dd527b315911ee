pub mod app_config;
pub mod database;
pub mod flight_repo;
pub mod passenger_repo;
pub mod booking_repo;
pub mod seed;

use std::sync::Arc;
use tracing::info;
use flightbook_core::repository::{BookingRepository, FlightRepository, PassengerRepository};
use flightbook_core::InMemoryStore;

pub use app_config::{Config, DatabaseConfig, StoreBackend};
pub use database::DbClient;
pub use flight_repo::PgFlightRepository;
pub use passenger_repo::PgPassengerRepository;
pub use booking_repo::PgBookingRepository;
pub use seed::{seed_flight_inputs, seed_flights, SeedError};

#[derive(Debug, thiserror::Error)]
pub enum StoreSetupError {
    #[error("Invalid database configuration: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Failed to connect to the database: {0}")]
    Connect(#[from] sqlx::Error),

    #[error("Failed to run migrations: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("Failed to seed flights: {0}")]
    Seed(#[from] SeedError),
}

/// The entity store as handed to request handlers: one repository per
/// collection, plus the pool to release on shutdown.
#[derive(Clone)]
pub struct StoreHandle {
    pub flights: Arc<dyn FlightRepository>,
    pub passengers: Arc<dyn PassengerRepository>,
    pub bookings: Arc<dyn BookingRepository>,
    db: Option<DbClient>,
}

impl StoreHandle {
    /// Open the configured backend. Postgres must be reachable and migrated;
    /// the in-memory backend starts with the seed flights loaded.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreSetupError> {
        match config.backend {
            StoreBackend::Postgres => {
                let url = config.require_url()?;
                let db = DbClient::new(config, url).await?;
                info!("Successfully connected to Postgres");
                db.migrate().await?;
                Ok(Self::postgres(db))
            }
            StoreBackend::Memory => {
                let handle = Self::in_memory();
                seed_flights(handle.flights.as_ref(), seed_flight_inputs()).await?;
                info!("Using in-memory store");
                Ok(handle)
            }
        }
    }

    pub fn postgres(db: DbClient) -> Self {
        Self {
            flights: Arc::new(PgFlightRepository::new(db.pool.clone())),
            passengers: Arc::new(PgPassengerRepository::new(db.pool.clone())),
            bookings: Arc::new(PgBookingRepository::new(db.pool.clone())),
            db: Some(db),
        }
    }

    pub fn in_memory() -> Self {
        let store = Arc::new(InMemoryStore::new());
        Self {
            flights: store.clone(),
            passengers: store.clone(),
            bookings: store,
            db: None,
        }
    }

    pub async fn close(&self) {
        if let Some(db) = &self.db {
            db.close().await;
        }
    }
}
