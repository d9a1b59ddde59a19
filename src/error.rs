//! Error types for the lookup and notes clients
//!
//! Library code returns these thiserror enums; the binary wraps them in
//! anyhow at the edge.

use thiserror::Error;

/// Failures from the Pokémon lookup service and the resolver
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// Transport-level failure (connect, timeout, 5xx)
    #[error("Network failure: {0}")]
    Network(String),

    /// 404-equivalent: unknown key or category
    #[error("Not found: {0}")]
    NotFound(String),

    /// Response arrived but could not be decoded
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// The resolution itself could not be carried out
    #[error("Resolution failed: {0}")]
    Orchestration(String),
}

impl LookupError {
    /// Per-item failures are swallowed by the resolver; orchestration failures are not.
    pub fn is_item_failure(&self) -> bool {
        !matches!(self, LookupError::Orchestration(_))
    }
}

impl From<reqwest::Error> for LookupError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            LookupError::Decode(error.to_string())
        } else {
            LookupError::Network(error.to_string())
        }
    }
}

/// Failures from the notes REST client
#[derive(Error, Debug)]
pub enum NotesError {
    /// Rejected client-side before any request was sent
    #[error("Validation error: {0}")]
    Validation(String),

    /// Non-2xx response from the notes API
    #[error("Notes API error {status}: {detail}")]
    Api { status: u16, detail: String },

    #[error("Network failure: {0}")]
    Network(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl NotesError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, NotesError::Api { status: 404, .. })
    }
}

impl From<reqwest::Error> for NotesError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            NotesError::Decode(error.to_string())
        } else {
            NotesError::Network(error.to_string())
        }
    }
}

pub type LookupResult<T> = std::result::Result<T, LookupError>;
pub type NotesResult<T> = std::result::Result<T, NotesError>;
