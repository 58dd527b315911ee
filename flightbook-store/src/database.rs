use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use std::time::Duration;
use tracing::info;
use flightbook_core::StoreError;
use crate::app_config::DatabaseConfig;

#[derive(Clone)]
pub struct DbClient {
    pub pool: Pool<Postgres>,
}

impl DbClient {
    pub async fn new(config: &DatabaseConfig, connection_string: &str) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect(connection_string)
            .await?;

        Ok(Self { pool })
    }

    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        info!("Running database migrations...");
        sqlx::migrate!("../migrations")
            .run(&self.pool)
            .await?;
        info!("Migrations completed successfully.");
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database pool closed.");
    }
}

/// Translate a sqlx failure into the store taxonomy. Unique violations carry
/// the offending column, taken from the constraint name.
pub(crate) fn map_sqlx_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            let field = match db_err.constraint() {
                Some("flights_flight_number_key") => "flight_number",
                Some("passengers_email_key") => "email",
                Some(other) => other,
                None => "unknown",
            };
            return StoreError::DuplicateKey { field: field.to_string() };
        }
    }
    StoreError::Backend(err.to_string())
}
