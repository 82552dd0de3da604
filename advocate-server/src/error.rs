//! HTTP error mapping.
//!
//! Every failure renders as `{"error": "<message>"}` with a non-2xx status.
//! Store details are logged, never sent to the client.

use advocate_core::{ErrorBody, StoreError};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to fetch advocates")]
    Fetch(#[source] StoreError),

    #[error("Database not connected. Set DATABASE_URL environment variable.")]
    StoreUnavailable,

    #[error("Failed to seed database")]
    Seed(#[source] StoreError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Fetch(_) | AppError::Seed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::StoreUnavailable => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Fetch(e) => tracing::error!(error = %e, "error in advocates API"),
            AppError::Seed(e) => tracing::error!(error = %e, "error seeding database"),
            AppError::StoreUnavailable => tracing::warn!("seed requested without a database"),
        }
        (self.status(), Json(ErrorBody::new(self.to_string()))).into_response()
    }
}
