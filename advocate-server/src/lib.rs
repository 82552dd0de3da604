//! advocate-server: REST front for the advocate directory.
//!
//! Serves the query endpoint over whichever [`advocate_core::AdvocateStore`]
//! the [`state::AppState`] was built with.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use config::ServerConfig;
pub use router::build_router;
pub use state::AppState;
