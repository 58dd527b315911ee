use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;
use flightbook_core::models::{NewPassenger, Passenger};
use flightbook_core::repository::{PassengerRepository, StoreResult};
use flightbook_shared::Masked;
use crate::database::map_sqlx_error;

pub struct PgPassengerRepository {
    pool: PgPool,
}

impl PgPassengerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct PassengerRow {
    id: Uuid,
    full_name: String,
    email: String,
    phone: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<PassengerRow> for Passenger {
    fn from(row: PassengerRow) -> Self {
        Passenger {
            id: row.id,
            full_name: row.full_name,
            email: Masked(row.email),
            phone: row.phone.map(Masked),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const PASSENGER_COLUMNS: &str = "id, full_name, email, phone, created_at, updated_at";

#[async_trait]
impl PassengerRepository for PgPassengerRepository {
    async fn create_passenger(&self, passenger: NewPassenger) -> StoreResult<Passenger> {
        let sql = format!(
            r#"
            INSERT INTO passengers (id, full_name, email, phone, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $5)
            RETURNING {PASSENGER_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, PassengerRow>(&sql)
            .bind(Uuid::new_v4())
            .bind(&passenger.full_name)
            .bind(&passenger.email)
            .bind(&passenger.phone)
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn find_passenger(&self, id: Uuid) -> StoreResult<Option<Passenger>> {
        let sql = format!("SELECT {PASSENGER_COLUMNS} FROM passengers WHERE id = $1");
        let row = sqlx::query_as::<_, PassengerRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.map(Passenger::from))
    }

    async fn find_passengers(&self, ids: &[Uuid]) -> StoreResult<Vec<Passenger>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let sql = format!("SELECT {PASSENGER_COLUMNS} FROM passengers WHERE id = ANY($1)");
        let rows = sqlx::query_as::<_, PassengerRow>(&sql)
            .bind(ids)
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(Passenger::from).collect())
    }
}
