use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;
use crate::models::{Booking, Flight, NewBooking, NewFlight, NewPassenger, Passenger};
use crate::repository::{BookingRepository, FlightRepository, PassengerRepository, StoreResult, StoreError};

/// In-process entity store with the same uniqueness and ordering rules as the
/// Postgres store. Records are kept in insertion order.
#[derive(Default)]
pub struct InMemoryStore {
    collections: RwLock<Collections>,
}

#[derive(Default)]
struct Collections {
    flights: Vec<Flight>,
    passengers: Vec<Passenger>,
    bookings: Vec<Booking>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FlightRepository for InMemoryStore {
    async fn create_flight(&self, flight: NewFlight) -> StoreResult<Flight> {
        let mut collections = self.collections.write().await;
        if collections.flights.iter().any(|f| f.flight_number == flight.flight_number) {
            return Err(StoreError::DuplicateKey { field: "flight_number".to_string() });
        }
        let record = flight.into_record(Uuid::new_v4(), Utc::now());
        collections.flights.push(record.clone());
        Ok(record)
    }

    async fn find_flight(&self, id: Uuid) -> StoreResult<Option<Flight>> {
        let collections = self.collections.read().await;
        Ok(collections.flights.iter().find(|f| f.id == id).cloned())
    }

    async fn find_flights(&self, ids: &[Uuid]) -> StoreResult<Vec<Flight>> {
        let collections = self.collections.read().await;
        Ok(collections
            .flights
            .iter()
            .filter(|f| ids.contains(&f.id))
            .cloned()
            .collect())
    }

    async fn list_flights(&self) -> StoreResult<Vec<Flight>> {
        let mut flights = self.collections.read().await.flights.clone();
        flights.sort_by_key(|f| f.departure_time);
        Ok(flights)
    }

    async fn delete_all_flights(&self) -> StoreResult<u64> {
        let mut collections = self.collections.write().await;
        let deleted = collections.flights.len() as u64;
        collections.flights.clear();
        Ok(deleted)
    }
}

#[async_trait]
impl PassengerRepository for InMemoryStore {
    async fn create_passenger(&self, passenger: NewPassenger) -> StoreResult<Passenger> {
        let mut collections = self.collections.write().await;
        if collections.passengers.iter().any(|p| p.email.expose() == &passenger.email) {
            return Err(StoreError::DuplicateKey { field: "email".to_string() });
        }
        let record = passenger.into_record(Uuid::new_v4(), Utc::now());
        collections.passengers.push(record.clone());
        Ok(record)
    }

    async fn find_passenger(&self, id: Uuid) -> StoreResult<Option<Passenger>> {
        let collections = self.collections.read().await;
        Ok(collections.passengers.iter().find(|p| p.id == id).cloned())
    }

    async fn find_passengers(&self, ids: &[Uuid]) -> StoreResult<Vec<Passenger>> {
        let collections = self.collections.read().await;
        Ok(collections
            .passengers
            .iter()
            .filter(|p| ids.contains(&p.id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl BookingRepository for InMemoryStore {
    async fn create_booking(&self, booking: NewBooking) -> StoreResult<Booking> {
        let mut collections = self.collections.write().await;
        let record = booking.into_record(Uuid::new_v4(), Utc::now());
        collections.bookings.push(record.clone());
        Ok(record)
    }

    async fn list_bookings(&self) -> StoreResult<Vec<Booking>> {
        // Reverse first so bookings sharing a timestamp stay newest-first.
        let mut bookings: Vec<Booking> = self.collections.read().await.bookings.iter().rev().cloned().collect();
        bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(bookings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn new_flight(number: &str, day: u32) -> NewFlight {
        let departure = Utc.with_ymd_and_hms(2025, 7, day, 8, 0, 0).unwrap();
        NewFlight {
            flight_number: number.to_string(),
            origin: "YYZ".to_string(),
            destination: "LGA".to_string(),
            departure_time: departure,
            arrival_time: departure + Duration::minutes(95),
            price: 100.0,
        }
    }

    #[tokio::test]
    async fn test_flights_sorted_by_departure() {
        let store = InMemoryStore::new();
        store.create_flight(new_flight("UA202", 15)).await.unwrap();
        store.create_flight(new_flight("AA101", 10)).await.unwrap();
        store.create_flight(new_flight("DL404", 11)).await.unwrap();

        let numbers: Vec<String> = store
            .list_flights()
            .await
            .unwrap()
            .into_iter()
            .map(|f| f.flight_number)
            .collect();
        assert_eq!(numbers, vec!["AA101", "DL404", "UA202"]);
    }

    #[tokio::test]
    async fn test_unique_flight_number_and_email() {
        let store = InMemoryStore::new();
        store.create_flight(new_flight("AA101", 10)).await.unwrap();
        let err = store.create_flight(new_flight("AA101", 12)).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateKey { ref field } if field == "flight_number"));

        let jane = NewPassenger {
            full_name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: None,
        };
        store.create_passenger(jane.clone()).await.unwrap();
        let err = store.create_passenger(jane).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateKey { ref field } if field == "email"));
    }

    #[tokio::test]
    async fn test_bookings_newest_first() {
        let store = InMemoryStore::new();
        let flight = store.create_flight(new_flight("AA101", 10)).await.unwrap();
        let first = store
            .create_booking(NewBooking { flight: flight.id, passenger: Uuid::new_v4(), seat_number: None })
            .await
            .unwrap();
        let second = store
            .create_booking(NewBooking { flight: flight.id, passenger: Uuid::new_v4(), seat_number: None })
            .await
            .unwrap();

        let ids: Vec<Uuid> = store.list_bookings().await.unwrap().into_iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[tokio::test]
    async fn test_delete_all_flights() {
        let store = InMemoryStore::new();
        store.create_flight(new_flight("AA101", 10)).await.unwrap();
        store.create_flight(new_flight("UA202", 15)).await.unwrap();
        assert_eq!(store.delete_all_flights().await.unwrap(), 2);
        assert!(store.list_flights().await.unwrap().is_empty());
    }
}
