use std::{collections::HashMap, sync::Arc};

use dashmap::DashMap;
use tokio::sync::Mutex;

pub(crate) type Slot = Arc<Mutex<Option<Vec<u8>>>>;

/// Sharded map of per-key async mutexes.
///
/// The `DashMap` shard lock is only held long enough to clone a slot's `Arc`,
/// never across an `.await`.
#[derive(Default)]
pub(crate) struct Slots {
    inner: DashMap<String, Slot>,
}

impl Slots {
    pub(crate) fn from_entries(entries: HashMap<String, Vec<u8>>) -> Self {
        let inner = entries
            .into_iter()
            .map(|(k, v)| (k, Arc::new(Mutex::new(Some(v)))))
            .collect();
        Self { inner }
    }

    pub(crate) fn get(&self, key: &str) -> Option<Slot> {
        self.inner.get(key).map(|s| Arc::clone(s.value()))
    }

    pub(crate) fn get_or_insert(&self, key: &str) -> Slot {
        if let Some(slot) = self.get(key) {
            return slot;
        }
        Arc::clone(self.inner.entry(key.to_owned()).or_default().value())
    }

    /// Drop `slot` from the map if it never received a value and only the map
    /// and the caller still reference it.
    ///
    /// Call after releasing the slot's lock. Anyone else holding a clone keeps
    /// the slot alive.
    pub(crate) fn discard_vacant(&self, key: &str, slot: &Slot) {
        self.inner.remove_if(key, |_, s| {
            Arc::ptr_eq(s, slot)
                && Arc::strong_count(s) <= 2
                && s.try_lock().map(|v| v.is_none()).unwrap_or(false)
        });
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.inner.len()
    }
}
