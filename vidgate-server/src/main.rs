use anyhow::Result;

use vidgate_axum::{GatewaySettings, GatewayState};
use vidgate_store::{AdapterConfig, MediaAdapter, S3MediaStore, StoreConfig};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let store_config = StoreConfig::from_env()?;
    let bucket = store_config.bucket.clone();
    let store = S3MediaStore::connect(store_config).await?;
    let adapter = MediaAdapter::new(store, AdapterConfig::from_env());
    let settings = GatewaySettings::from_env();
    let state = GatewayState::new(adapter, settings);

    let host = std::env::var("HTTP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = std::env::var("HTTP_PORT").unwrap_or_else(|_| "3030".to_string());
    let addr = format!("{host}:{port}");

    tracing::info!(%addr, %bucket, "vidgate listening");

    vidgate_axum::listen(addr, vidgate_axum::router(state)).await?;

    Ok(())
}
