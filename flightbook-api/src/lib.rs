use std::any::Any;
use axum::{
    http::{Method, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Json,
    Router,
};
use serde_json::{json, Value};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod state;
pub mod error;
pub mod extract;
pub mod flights;
pub mod passengers;
pub mod bookings;

pub use state::AppState;
use error::AppError;

pub fn app(state: AppState) -> Router {
    // The web client is served from a different origin.
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    Router::new()
        .route("/", get(root))
        .merge(flights::routes())
        .merge(passengers::routes())
        .merge(bookings::routes())
        .fallback(not_found)
        // A known path with the wrong method is still a 404.
        .method_not_allowed_fallback(not_found)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root() -> Json<Value> {
    Json(json!({ "message": "Flight Booking API is running." }))
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFoundError(format!("Not Found - {}", uri))
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    tracing::error!(%detail, "Unhandled error in request handler");

    AppError::InternalServerError("Something went wrong on the server!".to_string()).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_panic_becomes_generic_server_error() {
        let app: Router = Router::new()
            .route(
                "/explode",
                get(|| async {
                    if true {
                        panic!("connection to postgres://admin:hunter2@db refused");
                    }
                    "unreachable"
                }),
            )
            .layer(CatchPanicLayer::custom(handle_panic));

        let request = Request::builder().uri("/explode").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(!text.contains("hunter2"));
        assert!(!text.contains("postgres://"));

        let body: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(body, json!({ "message": "Something went wrong on the server!" }));
    }

    #[tokio::test]
    async fn test_non_string_panic_payload_is_handled() {
        let response = handle_panic(Box::new(42_u32));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
