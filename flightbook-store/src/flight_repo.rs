use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;
use flightbook_core::models::{Flight, NewFlight};
use flightbook_core::repository::{FlightRepository, StoreResult};
use crate::database::map_sqlx_error;

pub struct PgFlightRepository {
    pool: PgPool,
}

impl PgFlightRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct FlightRow {
    id: Uuid,
    flight_number: String,
    origin: String,
    destination: String,
    departure_time: DateTime<Utc>,
    arrival_time: DateTime<Utc>,
    price: f64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<FlightRow> for Flight {
    fn from(row: FlightRow) -> Self {
        Flight {
            id: row.id,
            flight_number: row.flight_number,
            origin: row.origin,
            destination: row.destination,
            departure_time: row.departure_time,
            arrival_time: row.arrival_time,
            price: row.price,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const FLIGHT_COLUMNS: &str =
    "id, flight_number, origin, destination, departure_time, arrival_time, price, created_at, updated_at";

#[async_trait]
impl FlightRepository for PgFlightRepository {
    async fn create_flight(&self, flight: NewFlight) -> StoreResult<Flight> {
        let now = Utc::now();
        let sql = format!(
            r#"
            INSERT INTO flights (id, flight_number, origin, destination, departure_time, arrival_time, price, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
            RETURNING {FLIGHT_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, FlightRow>(&sql)
            .bind(Uuid::new_v4())
            .bind(&flight.flight_number)
            .bind(&flight.origin)
            .bind(&flight.destination)
            .bind(flight.departure_time)
            .bind(flight.arrival_time)
            .bind(flight.price)
            .bind(now)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn find_flight(&self, id: Uuid) -> StoreResult<Option<Flight>> {
        let sql = format!("SELECT {FLIGHT_COLUMNS} FROM flights WHERE id = $1");
        let row = sqlx::query_as::<_, FlightRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.map(Flight::from))
    }

    async fn find_flights(&self, ids: &[Uuid]) -> StoreResult<Vec<Flight>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let sql = format!("SELECT {FLIGHT_COLUMNS} FROM flights WHERE id = ANY($1)");
        let rows = sqlx::query_as::<_, FlightRow>(&sql)
            .bind(ids)
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(Flight::from).collect())
    }

    async fn list_flights(&self) -> StoreResult<Vec<Flight>> {
        let sql = format!("SELECT {FLIGHT_COLUMNS} FROM flights ORDER BY departure_time ASC, created_at ASC");
        let rows = sqlx::query_as::<_, FlightRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(Flight::from).collect())
    }

    async fn delete_all_flights(&self) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM flights")
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected())
    }
}
