//! Record providers behind the query endpoint.
//!
//! [`AdvocateStore`] is the only seam the server talks to. [`FixtureStore`]
//! serves a fixed in-memory set; the Postgres store lives in
//! [`crate::postgres`] behind the `postgres` feature.

use async_trait::async_trait;
use std::fmt;

use crate::error::{Result, StoreError};
use crate::fixtures;
use crate::matcher::filter_advocates;
use crate::types::{Advocate, NewAdvocate};

/// Which kind of store is answering queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Database,
    Fixture,
}

impl StoreKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreKind::Database => "database",
            StoreKind::Fixture => "fixture",
        }
    }
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[async_trait]
pub trait AdvocateStore: Send + Sync {
    fn kind(&self) -> StoreKind;

    /// Records matching `query`, ordered by id.
    ///
    /// `None` or a blank query returns every record.
    async fn search(&self, query: Option<&str>) -> Result<Vec<Advocate>>;

    /// Insert records and return them with their assigned identifiers.
    async fn insert_many(&self, advocates: &[NewAdvocate]) -> Result<Vec<Advocate>>;
}

/// Read-only in-memory store.
#[derive(Debug, Clone)]
pub struct FixtureStore {
    advocates: Vec<Advocate>,
}

impl FixtureStore {
    /// Serve `advocates`, kept sorted by id.
    pub fn new(mut advocates: Vec<Advocate>) -> Self {
        advocates.sort_by_key(|a| a.id);
        Self { advocates }
    }

    pub fn advocates(&self) -> &[Advocate] {
        &self.advocates
    }
}

impl Default for FixtureStore {
    fn default() -> Self {
        Self::new(fixtures::advocates())
    }
}

#[async_trait]
impl AdvocateStore for FixtureStore {
    fn kind(&self) -> StoreKind {
        StoreKind::Fixture
    }

    async fn search(&self, query: Option<&str>) -> Result<Vec<Advocate>> {
        let results = filter_advocates(&self.advocates, query.unwrap_or_default());
        tracing::debug!(
            query = query.unwrap_or("all records"),
            count = results.len(),
            "fixture search"
        );
        Ok(results)
    }

    async fn insert_many(&self, _advocates: &[NewAdvocate]) -> Result<Vec<Advocate>> {
        Err(StoreError::Unavailable)
    }
}
