pub mod models;
pub mod validation;
pub mod repository;
pub mod populate;
pub mod memory;
pub mod booking;
pub mod passenger;

pub use models::{Booking, BookingInput, Flight, FlightInput, Passenger, PassengerInput};
pub use repository::{BookingRepository, FlightRepository, PassengerRepository, StoreError, StoreResult};
pub use validation::{FieldError, ValidationErrors};
pub use populate::{BookingDetails, BookingListing};
pub use memory::InMemoryStore;
pub use booking::{BookingError, BookingService, ReferenceKind};
pub use passenger::{PassengerError, PassengerService};
