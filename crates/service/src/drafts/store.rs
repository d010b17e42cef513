use std::sync::Arc;

use async_trait::async_trait;
use models::{Draft, DraftUpdate};

use super::collection::{owner_key, DraftCollection};
use super::repository::DraftRepository;
use crate::errors::ServiceError;
use crate::storage::{txn, KvStore};

/// `DraftRepository` over an injected key-value store.
///
/// One owner's collection is one value; every mutation rewrites it whole.
#[derive(Clone)]
pub struct DraftStore {
    kv: Arc<dyn KvStore>,
}

impl DraftStore {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self { kv }
    }

    async fn load(&self, id: i64) -> Result<DraftCollection, ServiceError> {
        let bytes = self
            .kv
            .view(&owner_key(id))
            .await?
            .ok_or_else(|| ServiceError::not_found("drafts"))?;
        DraftCollection::decode(&bytes)
    }
}

fn existing(current: Option<&[u8]>) -> Result<DraftCollection, ServiceError> {
    let bytes = current.ok_or_else(|| ServiceError::not_found("drafts"))?;
    DraftCollection::decode(bytes)
}

#[async_trait]
impl DraftRepository for DraftStore {
    async fn list(&self, id: i64) -> Result<Vec<Draft>, ServiceError> {
        Ok(self.load(id).await?.into_vec())
    }

    async fn get(&self, id: i64, context: &str) -> Result<Draft, ServiceError> {
        self.load(id)
            .await?
            .get(context)
            .cloned()
            .ok_or_else(|| ServiceError::not_found("draft"))
    }

    async fn create(&self, draft: Draft) -> Result<(), ServiceError> {
        let key = owner_key(draft.id);
        self.kv
            .update(&key, txn(move |current| {
                let mut collection = match current {
                    Some(bytes) => DraftCollection::decode(bytes)?,
                    None => DraftCollection::default(),
                };
                collection.insert(draft)?;
                collection.encode()
            }))
            .await
    }

    async fn delete(&self, id: i64, context: &str) -> Result<(), ServiceError> {
        self.kv
            .update(&owner_key(id), txn(|current| {
                let mut collection = existing(current)?;
                collection.remove(context)?;
                collection.encode()
            }))
            .await
    }

    async fn update(&self, update: DraftUpdate) -> Result<Draft, ServiceError> {
        let key = owner_key(update.id);
        let mut updated: Option<Draft> = None;
        self.kv
            .update(&key, txn(|current| {
                let mut collection = existing(current)?;
                let draft = collection.update(&update.context, update.kind, update.data)?;
                updated = Some(draft.clone());
                collection.encode()
            }))
            .await?;
        updated.ok_or_else(|| ServiceError::Storage("update committed without a result".into()))
    }
}
