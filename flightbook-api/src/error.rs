use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, warn};
use flightbook_core::{BookingError, PassengerError, StoreError};

#[derive(Debug)]
pub enum AppError {
    ValidationError(Vec<String>),
    BadRequestError(String),
    NotFoundError(String),
    ConflictError(String),
    /// Carries only the message shown to the caller; the cause is logged
    /// where the error is raised.
    InternalServerError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::ValidationError(errors) => (
                StatusCode::BAD_REQUEST,
                json!({ "message": "Validation Error", "errors": errors }),
            ),
            AppError::BadRequestError(msg) => (StatusCode::BAD_REQUEST, json!({ "message": msg })),
            AppError::NotFoundError(msg) => (StatusCode::NOT_FOUND, json!({ "message": msg })),
            AppError::ConflictError(msg) => (StatusCode::CONFLICT, json!({ "message": msg })),
            AppError::InternalServerError(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "message": msg }))
            }
        };

        (status, Json(body)).into_response()
    }
}

impl AppError {
    /// Log a store failure and hide it behind `message`.
    pub fn store(operation: &str, message: &str, err: StoreError) -> Self {
        error!(operation, error = %err, "Store error");
        AppError::InternalServerError(message.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        warn!(error = %rejection.body_text(), "Rejected request body");
        AppError::ValidationError(vec![rejection.body_text()])
    }
}

impl From<PassengerError> for AppError {
    fn from(err: PassengerError) -> Self {
        match err {
            PassengerError::Validation(errors) => {
                warn!(fields = ?errors.fields(), "Passenger validation failed");
                AppError::ValidationError(errors.messages())
            }
            PassengerError::Store(StoreError::DuplicateKey { field }) => {
                warn!(%field, "Passenger rejected: duplicate key");
                AppError::ConflictError("Passenger with this email already exists.".to_string())
            }
            PassengerError::Store(err) => {
                AppError::store("create_passenger", "Error adding passenger", err)
            }
        }
    }
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::MissingReference => {
                warn!("Booking rejected: missing flight or passenger id");
                AppError::BadRequestError(err.to_string())
            }
            BookingError::InvalidIdentifier { field, ref value } => {
                warn!(field, %value, "Booking rejected: malformed identifier");
                AppError::BadRequestError(err.to_string())
            }
            BookingError::ReferenceNotFound { .. } => AppError::NotFoundError(err.to_string()),
            BookingError::Store(err) => AppError::store("create_booking", "Booking failed", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flightbook_core::ReferenceKind;
    use uuid::Uuid;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_booking_error_statuses() {
        assert_eq!(status_of(BookingError::MissingReference.into()), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_of(BookingError::InvalidIdentifier { field: "flight", value: "x".into() }.into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(BookingError::ReferenceNotFound { kind: ReferenceKind::Flight, id: Uuid::new_v4() }.into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(BookingError::Store(StoreError::Backend("connection reset".into())).into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_passenger_error_statuses() {
        assert_eq!(
            status_of(PassengerError::Store(StoreError::DuplicateKey { field: "email".into() }).into()),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(PassengerError::Validation(Default::default()).into()),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_internal_error_does_not_leak_cause() {
        let err: AppError = BookingError::Store(StoreError::Backend("password authentication failed".into())).into();
        match err {
            AppError::InternalServerError(msg) => assert_eq!(msg, "Booking failed"),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
