//! Command handlers for `search` and `geocode`.
//!
//! Both print JSON to stdout; logs go to stderr so the output can be piped.

use std::time::Duration;

use anyhow::Context;
use medfind_core::{AmenityKind, AppConfig, Coordinate, SourceKind};
use medfind_search::{
    AmenitySource, GeocodeClient, OverpassSource, SearchConfig, Searcher, TableSource,
};

fn build_source(config: &AppConfig) -> anyhow::Result<AmenitySource> {
    let source = match config.source {
        SourceKind::Table => AmenitySource::Table(
            TableSource::from_csv_path(&config.dataset_path, config.dataset_kind)
                .with_context(|| format!("loading {}", config.dataset_path.display()))?,
        ),
        SourceKind::Overpass => AmenitySource::Overpass(
            OverpassSource::new(
                &config.overpass_url,
                config.request_timeout_secs,
                &config.user_agent,
            )
            .context("failed to build Overpass client")?,
        ),
    };
    Ok(source)
}

/// Runs one search and prints the ranked results as pretty JSON.
///
/// # Errors
///
/// Returns an error if the origin is out of range, the source cannot be
/// built, or the search fails.
pub(crate) async fn run_search(
    config: &AppConfig,
    lat: f64,
    lon: f64,
    radius_km: f64,
    kind: AmenityKind,
) -> anyhow::Result<()> {
    let origin = Coordinate::new(lat, lon)?;
    let searcher = Searcher::new(
        build_source(config)?,
        Duration::from_secs(config.request_timeout_secs),
    );
    let search_config = SearchConfig {
        radius_km,
        amenity_kind: kind,
    };

    let ranked = searcher.search(origin, &search_config).await?;
    if ranked.is_empty() {
        tracing::info!(%origin, radius_km, %kind, "no amenities found");
    }
    println!("{}", serde_json::to_string_pretty(&ranked)?);
    Ok(())
}

/// Looks up `place` and prints the best match as pretty JSON.
///
/// # Errors
///
/// Returns an error if the geocoder fails or nothing matches.
pub(crate) async fn run_geocode(config: &AppConfig, place: &str) -> anyhow::Result<()> {
    let client = GeocodeClient::new(
        &config.nominatim_url,
        config.request_timeout_secs,
        &config.user_agent,
    )?;

    let found = client
        .lookup(place)
        .await?
        .ok_or_else(|| anyhow::anyhow!("no location found for '{place}'"))?;
    println!("{}", serde_json::to_string_pretty(&found)?);
    Ok(())
}
