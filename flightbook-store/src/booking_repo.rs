use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;
use flightbook_core::models::{Booking, NewBooking};
use flightbook_core::repository::{BookingRepository, StoreResult};
use crate::database::map_sqlx_error;

pub struct PgBookingRepository {
    pool: PgPool,
}

impl PgBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct BookingRow {
    id: Uuid,
    flight_id: Uuid,
    passenger_id: Uuid,
    seat_number: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<BookingRow> for Booking {
    fn from(row: BookingRow) -> Self {
        Booking {
            id: row.id,
            flight: row.flight_id,
            passenger: row.passenger_id,
            seat_number: row.seat_number,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl BookingRepository for PgBookingRepository {
    async fn create_booking(&self, booking: NewBooking) -> StoreResult<Booking> {
        let row = sqlx::query_as::<_, BookingRow>(
            r#"
            INSERT INTO bookings (id, flight_id, passenger_id, seat_number, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $5)
            RETURNING id, flight_id, passenger_id, seat_number, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(booking.flight)
        .bind(booking.passenger)
        .bind(&booking.seat_number)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn list_bookings(&self) -> StoreResult<Vec<Booking>> {
        let rows = sqlx::query_as::<_, BookingRow>(
            r#"
            SELECT id, flight_id, passenger_id, seat_number, created_at, updated_at
            FROM bookings
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(Booking::from).collect())
    }
}
