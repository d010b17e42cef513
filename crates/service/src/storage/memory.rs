use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use async_trait::async_trait;

use super::kv_store::{KvStore, Txn};
use super::slots::Slots;
use crate::errors::ServiceError;

/// In-process key-value store. Contents live as long as the handle.
#[derive(Default)]
pub struct MemoryKv {
    slots: Slots,
    closed: AtomicBool,
}

impl MemoryKv {
    pub fn open() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn ensure_open(&self) -> Result<(), ServiceError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(ServiceError::StoreClosed);
        }
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn slot_count(&self) -> usize {
        self.slots.len()
    }
}

#[async_trait]
impl KvStore for MemoryKv {
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
        let mut current = slot.lock().await;
        match txn(current.as_deref()) {
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
        self.closed.store(true, Ordering::Release);
        Ok(())
    }
}
