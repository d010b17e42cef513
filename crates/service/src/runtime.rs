//! Runtime helpers
//!
//! Builds the process-wide key-value store from configuration. The caller
//! owns the returned handle and must `close()` it on shutdown.

use std::{path::Path, sync::Arc};

use configs::{StorageBackend, StorageConfig};
use tracing::info;

use crate::storage::{JsonFileKv, KvStore, MemoryKv};

/// Open the backend selected by `cfg`.
pub async fn open_store(cfg: &StorageConfig) -> anyhow::Result<Arc<dyn KvStore>> {
    let store: Arc<dyn KvStore> = match cfg.backend {
        StorageBackend::Memory => {
            info!(backend = "memory", "opening draft store");
            MemoryKv::open()
        }
        StorageBackend::File => {
            let path = Path::new(&cfg.path);
            common::env::ensure_data_dir(path).await?;
            info!(backend = "file", path = %path.display(), "opening draft store");
            JsonFileKv::open(path).await?
        }
    };
    Ok(store)
}
