use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use ghcn_server::catalog::{CatalogRefresher, CatalogStore, FileBlobStore};
use ghcn_server::config::ServerConfig;
use ghcn_server::noaa::NoaaClient;
use ghcn_server::service::ClimateService;
use ghcn_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("ghcn_server=info,tower_http=info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(2);
        }
    };

    let client = NoaaClient::new(config.client_config()).expect("Failed to create NOAA client");
    let urls = client.urls().clone();

    let store = match CatalogStore::open(FileBlobStore::new(&config.catalog_path)).await {
        Ok(store) => Arc::new(store),
        Err(e) => {
            error!(error = %e, "cannot open station catalog");
            std::process::exit(1);
        }
    };
    info!(
        path = %config.catalog_path.display(),
        stations = store.get().await.len(),
        "loaded station catalog"
    );

    let refresher = Arc::new(CatalogRefresher::new(
        client.clone(),
        urls.clone(),
        store.clone(),
    ));

    // Bring the catalog up to date before serving.
    refresher.refresh().await;

    // Background check; the yearly gate makes most of these no-ops.
    let background = refresher.clone();
    let period = config.refresh_check_interval();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.tick().await; // First tick is immediate, skip it
        loop {
            interval.tick().await;
            background.refresh().await;
        }
    });

    let service = ClimateService::new(client, urls, store);
    let app = create_router(AppState::new(service));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("Failed to bind listen address");
    info!(addr = %config.bind_addr, "GHCN station server listening");

    axum::serve(listener, app).await.expect("Server error");
}
