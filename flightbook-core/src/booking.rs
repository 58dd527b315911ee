use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;
use crate::models::{BookingInput, NewBooking};
use crate::populate::{populate, populate_summaries, referenced_ids, BookingDetails, BookingListing};
use crate::repository::{
    parse_record_id, BookingRepository, FlightRepository, PassengerRepository, StoreError,
};
use crate::validation::non_blank;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Flight,
    Passenger,
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceKind::Flight => write!(f, "Flight"),
            ReferenceKind::Passenger => write!(f, "Passenger"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("Flight ID and Passenger ID are required.")]
    MissingReference,

    #[error("Invalid format for {field} ID.")]
    InvalidIdentifier { field: &'static str, value: String },

    #[error("{kind} with ID {id} not found.")]
    ReferenceNotFound { kind: ReferenceKind, id: Uuid },

    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for BookingError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::InvalidIdentifier { field, value } => BookingError::InvalidIdentifier { field, value },
            other => BookingError::Store(other),
        }
    }
}

/// Creates bookings after checking that both referenced records exist, and
/// serves the populated booking list.
///
/// Bookings are accepted whenever both references resolve: there is no seat
/// capacity check and a passenger may book the same flight more than once.
pub struct BookingService {
    flights: Arc<dyn FlightRepository>,
    passengers: Arc<dyn PassengerRepository>,
    bookings: Arc<dyn BookingRepository>,
}

impl BookingService {
    pub fn new(
        flights: Arc<dyn FlightRepository>,
        passengers: Arc<dyn PassengerRepository>,
        bookings: Arc<dyn BookingRepository>,
    ) -> Self {
        Self { flights, passengers, bookings }
    }

    pub async fn create_booking(&self, input: BookingInput) -> Result<BookingDetails, BookingError> {
        let (Some(raw_flight_id), Some(raw_passenger_id)) =
            (non_blank(input.flight_id), non_blank(input.passenger_id))
        else {
            return Err(BookingError::MissingReference);
        };

        let flight_id = parse_record_id("flight", &raw_flight_id)?;
        let passenger_id = parse_record_id("passenger", &raw_passenger_id)?;

        let (flight, passenger) = tokio::try_join!(
            self.flights.find_flight(flight_id),
            self.passengers.find_passenger(passenger_id),
        )?;

        let Some(flight) = flight else {
            warn!(%flight_id, "Booking rejected: flight not found");
            return Err(BookingError::ReferenceNotFound { kind: ReferenceKind::Flight, id: flight_id });
        };
        let Some(passenger) = passenger else {
            warn!(%passenger_id, "Booking rejected: passenger not found");
            return Err(BookingError::ReferenceNotFound { kind: ReferenceKind::Passenger, id: passenger_id });
        };

        let booking = self
            .bookings
            .create_booking(NewBooking {
                flight: flight_id,
                passenger: passenger_id,
                seat_number: non_blank(input.seat_number),
            })
            .await?;

        info!(
            booking_id = %booking.id,
            flight_number = %flight.flight_number,
            %passenger_id,
            "Booking created"
        );

        Ok(populate(booking, flight, passenger))
    }

    pub async fn list_bookings(&self) -> Result<Vec<BookingListing>, StoreError> {
        let bookings = self.bookings.list_bookings().await?;
        let (flight_ids, passenger_ids) = referenced_ids(&bookings);

        let (flights, passengers) = tokio::try_join!(
            self.flights.find_flights(&flight_ids),
            self.passengers.find_passengers(&passenger_ids),
        )?;

        Ok(populate_summaries(bookings, &flights, &passengers))
    }
}
