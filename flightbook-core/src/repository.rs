use async_trait::async_trait;
use uuid::Uuid;
use crate::models::{Booking, Flight, NewBooking, NewFlight, NewPassenger, Passenger};

/// Errors raised by the entity store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Duplicate value for unique field `{field}`")]
    DuplicateKey { field: String },

    #[error("Invalid {field} identifier: {value}")]
    InvalidIdentifier { field: &'static str, value: String },

    #[error("Store backend error: {0}")]
    Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Parse a record identifier as received from a client.
///
/// `field` names the reference being parsed (e.g. `flight`) and ends up in
/// the error so callers can tell which identifier was malformed.
pub fn parse_record_id(field: &'static str, raw: &str) -> StoreResult<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| StoreError::InvalidIdentifier {
        field,
        value: raw.to_string(),
    })
}

/// Repository trait for flight data access
#[async_trait]
pub trait FlightRepository: Send + Sync {
    async fn create_flight(&self, flight: NewFlight) -> StoreResult<Flight>;

    async fn find_flight(&self, id: Uuid) -> StoreResult<Option<Flight>>;

    /// Flights whose id is in `ids`; unknown ids are skipped.
    async fn find_flights(&self, ids: &[Uuid]) -> StoreResult<Vec<Flight>>;

    /// All flights, earliest departure first.
    async fn list_flights(&self) -> StoreResult<Vec<Flight>>;

    async fn delete_all_flights(&self) -> StoreResult<u64>;
}

/// Repository trait for passenger data access
#[async_trait]
pub trait PassengerRepository: Send + Sync {
    async fn create_passenger(&self, passenger: NewPassenger) -> StoreResult<Passenger>;

    async fn find_passenger(&self, id: Uuid) -> StoreResult<Option<Passenger>>;

    async fn find_passengers(&self, ids: &[Uuid]) -> StoreResult<Vec<Passenger>>;
}

/// Repository trait for booking data access
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn create_booking(&self, booking: NewBooking) -> StoreResult<Booking>;

    /// All bookings, newest first.
    async fn list_bookings(&self) -> StoreResult<Vec<Booking>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_record_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_record_id("flight", &id.to_string()).unwrap(), id);

        match parse_record_id("flight", "not-an-id") {
            Err(StoreError::InvalidIdentifier { field, value }) => {
                assert_eq!(field, "flight");
                assert_eq!(value, "not-an-id");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
