use thiserror::Error;

/// Failures crossing the catalog-service boundary.
///
/// Malformed card identifiers are deliberately absent: identifier parsing is
/// total and degrades to the no-numeric-part ordering case instead of
/// failing. Nothing here is fatal to the process; pair-fetch failures are
/// retryable and submission failures are logged and dropped.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network failure: {0}")]
    Network(#[from] reqwest::Error),

    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("unexpected status {status} from {url}")]
    UnexpectedStatus {
        status: reqwest::StatusCode,
        url: String,
    },
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }
}
