//! Expansion of booking references into embedded records.
//!
//! Bookings store only the ids of their flight and passenger. The read path
//! loads the referenced records separately and joins them here.

use std::collections::HashMap;
use serde::Serialize;
use uuid::Uuid;
use chrono::{DateTime, Utc};
use flightbook_shared::Masked;
use crate::models::{Booking, Flight, Passenger};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PopulatedBooking<F, P> {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub flight: F,
    pub passenger: P,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seat_number: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Booking returned right after creation, with the full referenced records.
pub type BookingDetails = PopulatedBooking<Flight, Passenger>;

/// Booking as listed. A reference whose record no longer exists (e.g. after
/// flights were reseeded) serializes as `null`.
pub type BookingListing = PopulatedBooking<Option<FlightSummary>, Option<PassengerSummary>>;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FlightSummary {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub flight_number: String,
    pub origin: String,
    pub destination: String,
    pub departure_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PassengerSummary {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub full_name: String,
    pub email: Masked<String>,
}

impl From<&Flight> for FlightSummary {
    fn from(flight: &Flight) -> Self {
        Self {
            id: flight.id,
            flight_number: flight.flight_number.clone(),
            origin: flight.origin.clone(),
            destination: flight.destination.clone(),
            departure_time: flight.departure_time,
        }
    }
}

impl From<&Passenger> for PassengerSummary {
    fn from(passenger: &Passenger) -> Self {
        Self {
            id: passenger.id,
            full_name: passenger.full_name.clone(),
            email: passenger.email.clone(),
        }
    }
}

pub fn populate<F, P>(booking: Booking, flight: F, passenger: P) -> PopulatedBooking<F, P> {
    PopulatedBooking {
        id: booking.id,
        flight,
        passenger,
        seat_number: booking.seat_number,
        created_at: booking.created_at,
        updated_at: booking.updated_at,
    }
}

/// Join bookings with their flight and passenger summaries, keeping the
/// order of `bookings`.
pub fn populate_summaries(
    bookings: Vec<Booking>,
    flights: &[Flight],
    passengers: &[Passenger],
) -> Vec<BookingListing> {
    let flights: HashMap<Uuid, &Flight> = flights.iter().map(|f| (f.id, f)).collect();
    let passengers: HashMap<Uuid, &Passenger> = passengers.iter().map(|p| (p.id, p)).collect();

    bookings
        .into_iter()
        .map(|booking| {
            let flight = flights.get(&booking.flight).map(|f| FlightSummary::from(*f));
            let passenger = passengers.get(&booking.passenger).map(|p| PassengerSummary::from(*p));
            populate(booking, flight, passenger)
        })
        .collect()
}

/// Distinct flight and passenger ids referenced by `bookings`.
pub fn referenced_ids(bookings: &[Booking]) -> (Vec<Uuid>, Vec<Uuid>) {
    let mut flight_ids: Vec<Uuid> = bookings.iter().map(|b| b.flight).collect();
    let mut passenger_ids: Vec<Uuid> = bookings.iter().map(|b| b.passenger).collect();
    flight_ids.sort();
    flight_ids.dedup();
    passenger_ids.sort();
    passenger_ids.dedup();
    (flight_ids, passenger_ids)
}
