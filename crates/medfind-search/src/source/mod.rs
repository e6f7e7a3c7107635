//! Candidate sources.
//!
//! A source returns raw, possibly unfiltered records near an origin. The
//! table source returns every row of the requested kinds and leaves the
//! radius to the ranker; the Overpass source pre-filters by radius on the
//! server side. Either way the ranker re-filters and re-sorts.

mod overpass;
mod table;

use std::future::Future;

use thiserror::Error;

use crate::types::{FetchRequest, RawCandidate};

pub use overpass::OverpassSource;
pub use table::TableSource;

/// Errors that can occur while obtaining raw candidates.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read dataset {path}: {source}")]
    Dataset {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("candidate fetch timed out after {secs}s")]
    Timeout { secs: u64 },
}

/// Supplies raw candidates for one search.
pub trait CandidateSource: Send + Sync {
    /// Short identifier used in logs and the health endpoint.
    fn name(&self) -> &'static str;

    /// Fetches raw candidates of `request.kinds` around `request.origin`.
    fn fetch(
        &self,
        request: &FetchRequest,
    ) -> impl Future<Output = Result<Vec<RawCandidate>, SourceError>> + Send;
}

/// The source variants selectable at startup.
#[derive(Debug)]
pub enum AmenitySource {
    Table(TableSource),
    Overpass(OverpassSource),
}

impl AmenitySource {
    /// Number of rows held in memory, for sources that hold any.
    #[must_use]
    pub fn dataset_size(&self) -> Option<usize> {
        match self {
            AmenitySource::Table(table) => Some(table.len()),
            AmenitySource::Overpass(_) => None,
        }
    }
}

impl CandidateSource for AmenitySource {
    fn name(&self) -> &'static str {
        match self {
            AmenitySource::Table(table) => table.name(),
            AmenitySource::Overpass(overpass) => overpass.name(),
        }
    }

    async fn fetch(&self, request: &FetchRequest) -> Result<Vec<RawCandidate>, SourceError> {
        match self {
            AmenitySource::Table(table) => table.fetch(request).await,
            AmenitySource::Overpass(overpass) => overpass.fetch(request).await,
        }
    }
}
