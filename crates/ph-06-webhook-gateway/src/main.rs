//! Standalone payhook server.
//!
//! ```text
//! payhook [config.toml]
//! ```
//!
//! The config path may also come from `PAYHOOK_CONFIG`. `PAYHOOK_*`
//! variables override file values.

use anyhow::{Context, Result};
use ph_02_event_dedup::{DedupStore, InMemoryDedupStore};
use ph_03_subscriber_registry::{handler_fn, SubscriberRegistry};
use ph_06_webhook_gateway::{init_logging, HubConfig, PaymentHub};
use shared_types::Event;
use std::sync::Arc;
use tracing::info;

fn load_config() -> Result<HubConfig> {
    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("PAYHOOK_CONFIG").ok());

    let mut config = match path {
        Some(path) => HubConfig::load(&path).with_context(|| format!("loading {path}"))?,
        None => HubConfig::default(),
    };
    config.apply_env_overrides()?;
    Ok(config)
}

fn dedup_store(config: &HubConfig) -> Result<Arc<dyn DedupStore>> {
    match &config.dedup_store_path {
        #[cfg(feature = "rocksdb")]
        Some(path) => {
            let store = ph_02_event_dedup::RocksDbDedupStore::open(path)
                .with_context(|| format!("opening dedup store at {}", path.display()))?;
            Ok(Arc::new(store))
        }
        #[cfg(not(feature = "rocksdb"))]
        Some(path) => anyhow::bail!(
            "dedup_store_path {} requires the rocksdb feature",
            path.display()
        ),
        None => Ok(Arc::new(InMemoryDedupStore::new())),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = load_config()?;
    init_logging(&config)?;

    let mut registry = SubscriberRegistry::new();
    registry.register_event_handler(
        "*",
        handler_fn("audit-log", |event: Event| async move {
            info!(
                event_id = event.id(),
                event_type = event.event_type(),
                livemode = ?event.livemode(),
                "Payment event received"
            );
            Ok(())
        }),
    )?;

    let store = dedup_store(&config)?;
    let hub = PaymentHub::new(config, registry, store)?;
    let mut service = hub.into_service();

    let addr = service.start().await?;
    info!(addr = %addr, "Payhook is running. Press Ctrl+C to stop.");
    tokio::signal::ctrl_c().await?;

    service.shutdown().await?;
    Ok(())
}
