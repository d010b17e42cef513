use std::sync::Arc;

use service::drafts::{DraftRepository, DraftStore};
use service::storage::KvStore;

/// Shared handler state. Borrows the store; its lifecycle belongs to `startup::run`.
#[derive(Clone)]
pub struct ServerState {
    pub drafts: Arc<dyn DraftRepository>,
}

impl ServerState {
    pub fn new(drafts: Arc<dyn DraftRepository>) -> Self {
        Self { drafts }
    }

    /// State backed by a `DraftStore` over `kv`.
    pub fn with_store(kv: Arc<dyn KvStore>) -> Self {
        Self::new(Arc::new(DraftStore::new(kv)))
    }
}
