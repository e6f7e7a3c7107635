mod api;
mod middleware;

use std::{sync::Arc, time::Duration};

use medfind_core::{AppConfig, SourceKind};
use medfind_search::{AmenitySource, GeocodeClient, OverpassSource, Searcher, TableSource};
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Arc::new(medfind_core::load_app_config()?);
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let source = build_source(&config)?;
    tracing::info!(
        env = %config.env,
        source = %config.source,
        dataset_size = ?source.dataset_size(),
        "candidate source ready"
    );

    let searcher = Searcher::new(source, Duration::from_secs(config.request_timeout_secs));
    let geocoder = GeocodeClient::new(
        &config.nominatim_url,
        config.request_timeout_secs,
        &config.user_agent,
    )?;

    let app = build_app(AppState {
        searcher: Arc::new(searcher),
        geocoder: Arc::new(geocoder),
        config: Arc::clone(&config),
    });

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

fn build_source(config: &AppConfig) -> anyhow::Result<AmenitySource> {
    let source = match config.source {
        SourceKind::Table => AmenitySource::Table(TableSource::from_csv_path(
            &config.dataset_path,
            config.dataset_kind,
        )?),
        SourceKind::Overpass => AmenitySource::Overpass(OverpassSource::new(
            &config.overpass_url,
            config.request_timeout_secs,
            &config.user_agent,
        )?),
    };
    Ok(source)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
