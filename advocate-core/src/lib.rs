//! advocate-core: records, matching and record stores for the advocate
//! directory.
//!
//! The server and the client both depend on this crate so that the search
//! contract lives in exactly one place.

pub mod error;
pub mod fixtures;
pub mod matcher;
#[cfg(feature = "postgres")]
pub mod postgres;
pub mod store;
pub mod types;
pub mod wire;

pub use error::StoreError;
pub use matcher::{filter_advocates, matches, normalize_query, SearchField};
pub use store::{AdvocateStore, FixtureStore, StoreKind};
pub use types::{Advocate, NewAdvocate, PhoneNumber};
pub use wire::{AdvocateList, ErrorBody, SeedResult};

#[cfg(feature = "postgres")]
pub use postgres::PgAdvocateStore;
