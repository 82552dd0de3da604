//! POST /api/seed: insert the fixture set into the configured database.

use advocate_core::{fixtures, SeedResult, StoreError};
use axum::{extract::State, Json};

use crate::error::AppError;
use crate::state::AppState;

pub async fn seed(State(state): State<AppState>) -> Result<Json<SeedResult>, AppError> {
    let advocates = state
        .store
        .insert_many(&fixtures::new_advocates())
        .await
        .map_err(|e| match e {
            StoreError::Unavailable => AppError::StoreUnavailable,
            other => AppError::Seed(other),
        })?;

    tracing::info!(count = advocates.len(), "seeded advocates");
    Ok(Json(SeedResult { advocates }))
}
