//! advocate-client: where the search UI gets its records, and the
//! coordinator that decides when to ask.
//!
//! [`HttpAdvocateClient`] filters on the server; [`LocalSearch`] fetches the
//! full set once and filters in memory. Both plug into [`SearchCoordinator`]
//! through [`AdvocateSource`].

pub mod coordinator;
pub mod error;
pub mod http;
pub mod local;
pub mod source;

pub use coordinator::{
    CoordinatorConfig, Phase, ResponseOrdering, SearchCoordinator, SearchHandle, SearchSnapshot,
};
pub use error::FetchError;
pub use http::HttpAdvocateClient;
pub use local::LocalSearch;
pub use source::{fetch_records, AdvocateSource};
