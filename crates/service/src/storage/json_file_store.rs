use std::{
    collections::{BTreeMap, HashMap},
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use async_trait::async_trait;
use tokio::{fs, sync::Mutex};

use super::kv_store::{KvStore, Txn};
use super::slots::Slots;
use crate::errors::ServiceError;

/// JSON file-backed key-value store.
///
/// Keeps the same per-key locking as `MemoryKv` and mirrors every committed
/// value into a JSON object `{ key: value }` on disk. Values must be UTF-8.
/// A commit only becomes visible once the snapshot file has been written.
pub struct JsonFileKv {
    slots: Slots,
    persisted: Mutex<BTreeMap<String, String>>,
    file_path: PathBuf,
    closed: AtomicBool,
}

impl JsonFileKv {
    /// Open the store at `path`. Creates the file with an empty map if missing.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(storage_err)?;
        }

        let persisted: BTreeMap<String, String> = match fs::read(&file_path).await {
            Ok(bytes) if bytes.is_empty() => BTreeMap::new(),
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                let empty = BTreeMap::new();
                write_snapshot(&file_path, &empty).await?;
                empty
            }
            Err(e) => return Err(storage_err(e)),
        };

        let entries: HashMap<String, Vec<u8>> = persisted
            .iter()
            .map(|(k, v)| (k.clone(), v.clone().into_bytes()))
            .collect();

        Ok(Arc::new(Self {
            slots: Slots::from_entries(entries),
            persisted: Mutex::new(persisted),
            file_path,
            closed: AtomicBool::new(false),
        }))
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    fn ensure_open(&self) -> Result<(), ServiceError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(ServiceError::StoreClosed);
        }
        Ok(())
    }

    /// Write `key = value` to disk; on failure the on-disk mirror is restored.
    async fn persist(&self, key: &str, value: &[u8]) -> Result<(), ServiceError> {
        let text = std::str::from_utf8(value)
            .map_err(|e| ServiceError::Codec(format!("value for key {key} is not UTF-8: {e}")))?
            .to_owned();
        let mut map = self.persisted.lock().await;
        let previous = map.insert(key.to_owned(), text);
        if let Err(e) = write_snapshot(&self.file_path, &map).await {
            match previous {
                Some(p) => map.insert(key.to_owned(), p),
                None => map.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }
}

#[async_trait]
impl KvStore for JsonFileKv {
    async fn view(&self, key: &str) -> Result<Option<Vec<u8>>, ServiceError> {
        self.ensure_open()?;
        let Some(slot) = self.slots.get(key) else {
            return Ok(None);
        };
        let value = slot.lock().await.clone();
        Ok(value)
    }

    async fn update(&self, key: &str, txn: Txn<'_>) -> Result<(), ServiceError> {
        self.ensure_open()?;
        let slot = self.slots.get_or_insert(key);
        // lock order: key slot, then the on-disk mirror
        let mut current = slot.lock().await;
        let outcome = match txn(current.as_deref()) {
            Ok(next) => self.persist(key, &next).await.map(|()| next),
            Err(e) => Err(e),
        };
        match outcome {
            Ok(next) => {
                *current = Some(next);
                Ok(())
            }
            Err(e) => {
                let vacant = current.is_none();
                drop(current);
                if vacant {
                    self.slots.discard_vacant(key, &slot);
                }
                Err(e)
            }
        }
    }

    async fn close(&self) -> Result<(), ServiceError> {
        if self.closed.swap(true, Ordering::AcqRel) {
            return Ok(());
        }
        let map = self.persisted.lock().await;
        write_snapshot(&self.file_path, &map).await
    }
}

async fn write_snapshot(path: &Path, map: &BTreeMap<String, String>) -> Result<(), ServiceError> {
    let data = serde_json::to_vec(map)?;
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    fs::write(&tmp, data).await.map_err(storage_err)?;
    fs::rename(&tmp, path).await.map_err(storage_err)?;
    Ok(())
}

fn storage_err(e: std::io::Error) -> ServiceError {
    ServiceError::Storage(e.to_string())
}
