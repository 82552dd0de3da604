//! GET /api/advocates?search=<text>: list advocates, optionally filtered.

use advocate_core::AdvocateList;
use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub search: Option<String>,
}

impl SearchParams {
    /// The search term, or `None` when absent or blank.
    pub fn term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }
}

pub async fn list_advocates(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<AdvocateList>, AppError> {
    let term = params.term();
    tracing::info!(
        backend = %state.kind(),
        "Using {} search for: \"{}\"",
        state.kind(),
        term.unwrap_or("all records")
    );

    let data = state.store.search(term).await.map_err(AppError::Fetch)?;

    tracing::info!(backend = %state.kind(), count = data.len(), "returned advocates");
    Ok(Json(AdvocateList { data }))
}
