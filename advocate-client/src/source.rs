//! AdvocateSource: where the coordinator gets its records from.

use std::sync::Arc;

use advocate_core::Advocate;
use async_trait::async_trait;

use crate::error::FetchError;

#[async_trait]
pub trait AdvocateSource: Send + Sync {
    /// Fetch advocates matching `query`; `None` fetches the full set.
    async fn fetch(&self, query: Option<&str>) -> Result<Vec<Advocate>, FetchError>;
}

#[async_trait]
impl<T: AdvocateSource + ?Sized> AdvocateSource for Arc<T> {
    async fn fetch(&self, query: Option<&str>) -> Result<Vec<Advocate>, FetchError> {
        (**self).fetch(query).await
    }
}

/// Issue exactly one fetch against `source`, logging whether it is filtered.
pub async fn fetch_records(
    source: &dyn AdvocateSource,
    query: Option<&str>,
) -> Result<Vec<Advocate>, FetchError> {
    match query {
        Some(term) => tracing::info!(search = term, "fetching filtered advocates"),
        None => tracing::info!("fetching all advocates"),
    }

    let outcome = source.fetch(query).await;
    match &outcome {
        Ok(advocates) => tracing::debug!(count = advocates.len(), "fetch succeeded"),
        Err(e) => tracing::error!(error = %e, "error fetching advocates"),
    }
    outcome
}
