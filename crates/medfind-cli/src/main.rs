mod search;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use medfind_core::{AmenityKind, SourceKind};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "medfind-cli")]
#[command(about = "Find pharmacies and hospitals near a point")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Rank amenities within a radius of a coordinate, nearest first
    Search {
        /// Origin latitude in decimal degrees
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        /// Origin longitude in decimal degrees
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
        /// Search radius in kilometres (defaults to `MEDFIND_DEFAULT_RADIUS_KM`)
        #[arg(long)]
        radius: Option<f64>,
        /// Amenity kind to search for
        #[arg(long, default_value = "pharmacy")]
        kind: AmenityKind,
        /// Candidate source (defaults to `MEDFIND_SOURCE`)
        #[arg(long, value_enum)]
        source: Option<SourceArg>,
        /// CSV dataset for the table source (defaults to `MEDFIND_DATASET_PATH`)
        #[arg(long)]
        dataset: Option<PathBuf>,
    },
    /// Resolve a place name to coordinates
    Geocode {
        /// Free-text place, e.g. "Connaught Place, New Delhi"
        place: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SourceArg {
    Table,
    Overpass,
}

impl From<SourceArg> for SourceKind {
    fn from(arg: SourceArg) -> Self {
        match arg {
            SourceArg::Table => SourceKind::Table,
            SourceArg::Overpass => SourceKind::Overpass,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = medfind_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Search {
            lat,
            lon,
            radius,
            kind,
            source,
            dataset,
        } => {
            if let Some(source) = source {
                config.source = source.into();
            }
            if let Some(dataset) = dataset {
                config.dataset_path = dataset;
            }
            let radius_km = radius.unwrap_or(config.default_radius_km);
            search::run_search(&config, lat, lon, radius_km, kind).await?;
        }
        Commands::Geocode { place } => search::run_geocode(&config, &place).await?,
    }

    Ok(())
}

#[cfg(test)]
mod tests;
