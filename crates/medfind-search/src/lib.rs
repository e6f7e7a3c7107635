pub mod distance;
pub mod error;
pub mod geocode;
pub mod normalize;
pub mod rank;
pub mod search;
pub mod source;
pub mod types;

pub use distance::{distance_km, EARTH_RADIUS_KM};
pub use error::SearchError;
pub use geocode::{GeocodeClient, GeocodeError, GeocodedPlace};
pub use normalize::{normalize, normalize_all, NormalizedBatch};
pub use rank::rank;
pub use search::{SearchConfig, SearchRequest, Searcher, DEFAULT_RADIUS_KM};
pub use source::{AmenitySource, CandidateSource, OverpassSource, SourceError, TableSource};
pub use types::{ApiCenter, ApiNode, FetchRequest, RawCandidate, TableRow};
