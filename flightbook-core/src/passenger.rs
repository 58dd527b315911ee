use std::sync::Arc;
use tracing::info;
use crate::models::{Passenger, PassengerInput};
use crate::repository::{PassengerRepository, StoreError};
use crate::validation::{validate_passenger, ValidationErrors};

#[derive(Debug, thiserror::Error)]
pub enum PassengerError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub struct PassengerService {
    passengers: Arc<dyn PassengerRepository>,
}

impl PassengerService {
    pub fn new(passengers: Arc<dyn PassengerRepository>) -> Self {
        Self { passengers }
    }

    /// Validate and persist a new passenger. A reused email surfaces as
    /// `StoreError::DuplicateKey`.
    pub async fn create_passenger(&self, input: PassengerInput) -> Result<Passenger, PassengerError> {
        let new_passenger = validate_passenger(input)?;
        let passenger = self.passengers.create_passenger(new_passenger).await?;
        info!(passenger_id = %passenger.id, email = %passenger.email, "Passenger created");
        Ok(passenger)
    }
}
