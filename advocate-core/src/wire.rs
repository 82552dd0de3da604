//! JSON envelopes exchanged between the server and its clients.
//!
//! Every response has exactly one top-level field; clients decode these types
//! directly and do not accept alternate shapes.

use serde::{Deserialize, Serialize};

use crate::types::Advocate;

/// Successful `GET /api/advocates` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdvocateList {
    pub data: Vec<Advocate>,
}

/// Successful `POST /api/seed` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedResult {
    pub advocates: Vec<Advocate>,
}

/// Body of every non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
