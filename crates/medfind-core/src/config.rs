use crate::app_config::{AppConfig, Environment, SourceKind};
use crate::{AmenityKind, ConfigError};

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can drive it with a
/// plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        or_default(var, default)
            .parse::<SocketAddr>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("MEDFIND_ENV", "development"))?;
    let bind_addr = parse_addr("MEDFIND_BIND_ADDR", "0.0.0.0:5000")?;
    let log_level = or_default("MEDFIND_LOG_LEVEL", "info");
    let source = parse_source(&or_default("MEDFIND_SOURCE", "table"))?;
    let dataset_path = PathBuf::from(or_default(
        "MEDFIND_DATASET_PATH",
        "./data/enriched_pharmacies_corrected.csv",
    ));
    let dataset_kind = or_default("MEDFIND_DATASET_KIND", "pharmacy")
        .parse::<AmenityKind>()
        .map_err(|e| invalid("MEDFIND_DATASET_KIND", e.to_string()))?;
    let overpass_url = or_default(
        "MEDFIND_OVERPASS_URL",
        "https://overpass-api.de/api/interpreter",
    );
    let nominatim_url = or_default(
        "MEDFIND_NOMINATIM_URL",
        "https://nominatim.openstreetmap.org",
    );

    let request_timeout_secs = parse_u64("MEDFIND_REQUEST_TIMEOUT_SECS", "20")?;
    if request_timeout_secs == 0 {
        return Err(invalid(
            "MEDFIND_REQUEST_TIMEOUT_SECS",
            "must be greater than zero".to_string(),
        ));
    }

    let user_agent = or_default("MEDFIND_USER_AGENT", "medfind/0.1 (amenity-search)");

    let default_radius_km = or_default("MEDFIND_DEFAULT_RADIUS_KM", "15")
        .parse::<f64>()
        .map_err(|e| invalid("MEDFIND_DEFAULT_RADIUS_KM", e.to_string()))?;
    if !default_radius_km.is_finite() || default_radius_km <= 0.0 {
        return Err(invalid(
            "MEDFIND_DEFAULT_RADIUS_KM",
            format!("must be a positive number of kilometres, got {default_radius_km}"),
        ));
    }

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        source,
        dataset_path,
        dataset_kind,
        overpass_url,
        nominatim_url,
        request_timeout_secs,
        user_agent,
        default_radius_km,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "MEDFIND_ENV".to_string(),
            reason: format!("expected development, test, or production; got '{other}'"),
        }),
    }
}

fn parse_source(s: &str) -> Result<SourceKind, ConfigError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "table" | "csv" => Ok(SourceKind::Table),
        "overpass" | "osm" => Ok(SourceKind::Overpass),
        other => Err(ConfigError::InvalidEnvVar {
            var: "MEDFIND_SOURCE".to_string(),
            reason: format!("expected table or overpass; got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
