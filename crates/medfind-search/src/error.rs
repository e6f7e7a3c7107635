use thiserror::Error;

use crate::source::SourceError;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("malformed candidate {candidate}: {reason}")]
    MalformedCandidate { candidate: String, reason: String },

    #[error("candidate source unavailable: {0}")]
    UpstreamUnavailable(String),
}

impl From<SourceError> for SearchError {
    fn from(err: SourceError) -> Self {
        SearchError::UpstreamUnavailable(err.to_string())
    }
}

impl From<medfind_core::CoreError> for SearchError {
    fn from(err: medfind_core::CoreError) -> Self {
        SearchError::InvalidRequest(err.to_string())
    }
}
