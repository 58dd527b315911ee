use axum::extract::FromRequest;
use crate::error::AppError;

/// `axum::Json` whose rejections (malformed JSON, wrong field types, missing
/// content type) become a 400 with the usual error body.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);
