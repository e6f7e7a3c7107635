use std::net::SocketAddr;
use std::path::PathBuf;

use crate::AmenityKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Where search candidates come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// CSV dataset loaded once at startup.
    Table,
    /// Live `OpenStreetMap` Overpass query per search.
    Overpass,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::Table => write!(f, "table"),
            SourceKind::Overpass => write!(f, "overpass"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub source: SourceKind,
    pub dataset_path: PathBuf,
    /// Kind assumed for dataset rows that carry no kind column.
    pub dataset_kind: AmenityKind,
    pub overpass_url: String,
    pub nominatim_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub default_radius_km: f64,
}
