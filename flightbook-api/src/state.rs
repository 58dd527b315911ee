use std::sync::Arc;
use flightbook_core::{BookingService, FlightRepository, PassengerService};
use flightbook_store::StoreHandle;

#[derive(Clone)]
pub struct AppState {
    pub flight_repo: Arc<dyn FlightRepository>,
    pub passengers: Arc<PassengerService>,
    pub bookings: Arc<BookingService>,
}

impl AppState {
    pub fn new(store: &StoreHandle) -> Self {
        Self {
            flight_repo: store.flights.clone(),
            passengers: Arc::new(PassengerService::new(store.passengers.clone())),
            bookings: Arc::new(BookingService::new(
                store.flights.clone(),
                store.passengers.clone(),
                store.bookings.clone(),
            )),
        }
    }
}
