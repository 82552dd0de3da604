use thiserror::Error;

/// Why a fetch from the query endpoint failed.
///
/// `Display` is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request never produced a response.
    #[error("Failed to fetch advocates: {0}")]
    Transport(String),

    /// The endpoint answered with a non-success status.
    #[error("Failed to fetch advocates (HTTP {status}): {message}")]
    Status { status: u16, message: String },

    /// The response body was not a valid advocate list.
    #[error("Failed to fetch advocates: unexpected response ({0})")]
    Decode(String),
}

impl FetchError {
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            FetchError::Decode(e.to_string())
        } else {
            FetchError::Transport(e.to_string())
        }
    }
}
