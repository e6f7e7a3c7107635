pub mod amenity;
pub mod app_config;
pub mod config;

pub use amenity::{map_link, Amenity, AmenityKind, Coordinate, RankedAmenity};
pub use app_config::{AppConfig, Environment, SourceKind};
pub use config::{load_app_config, load_app_config_from_env};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid coordinate ({latitude}, {longitude}): latitude must be within [-90, 90] and longitude within [-180, 180]")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    #[error("unknown amenity kind: {0}")]
    UnknownAmenityKind(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
