pub mod format;
pub mod local;
pub mod remote;
pub mod routed;
pub mod traits;

use log::info;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::config::{SimulatorConfig, StorageBackend};
use crate::errors::CoreError;

use local::LocalStore;
use remote::RemoteStore;
use routed::RoutedStore;
use traits::LedgerStore;

/// The store the simulator writes to, plus the local store used for
/// fallback reads and snapshots.
pub struct StoreHandles {
    pub primary: Arc<dyn LedgerStore>,
    pub local: Arc<LocalStore>,
}

/// Build the backend named in the configuration.
///
/// The local store is always created; it is loaded from
/// `storage.snapshot_path` when that file exists.
pub fn open_store(config: &SimulatorConfig) -> Result<StoreHandles, CoreError> {
    let local = Arc::new(open_local(config)?);

    let primary: Arc<dyn LedgerStore> = match config.storage.backend {
        StorageBackend::Local => local.clone(),
        StorageBackend::Remote => Arc::new(open_remote(config)?),
        StorageBackend::Auto => Arc::new(RoutedStore::new(
            Arc::new(open_remote(config)?),
            local.clone(),
        )),
    };

    info!("Opened {} store", primary.name());
    Ok(StoreHandles { primary, local })
}

fn open_local(config: &SimulatorConfig) -> Result<LocalStore, CoreError> {
    match config.storage.snapshot_path.as_deref() {
        Some(path) if Path::new(path).exists() => {
            info!("Loading local store snapshot from {path}");
            LocalStore::load_from_file(path, config.activity_log_capacity)
        }
        _ => Ok(LocalStore::new(config.activity_log_capacity)),
    }
}

fn open_remote(config: &SimulatorConfig) -> Result<RemoteStore, CoreError> {
    let url = config
        .storage
        .remote_url
        .as_deref()
        .ok_or_else(|| CoreError::Config("storage.remote_url is not set".into()))?;
    let key = config
        .storage
        .api_key
        .as_deref()
        .ok_or_else(|| CoreError::Config("storage.api_key is not set".into()))?;
    RemoteStore::new(url, key, Duration::from_secs(config.storage.timeout_secs))
}

/// True for canonical hyphenated UUIDs (`8-4-4-4-12` hex digits, any case),
/// the primary-key format of the remote `profiles` table.
pub fn is_valid_uuid(id: &str) -> bool {
    let bytes = id.as_bytes();
    if bytes.len() != 36 {
        return false;
    }
    bytes.iter().enumerate().all(|(i, b)| match i {
        8 | 13 | 18 | 23 => *b == b'-',
        _ => b.is_ascii_hexdigit(),
    })
}

/// Balance equality with a tolerance for f64 noise picked up in transit.
pub fn balances_match(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}
