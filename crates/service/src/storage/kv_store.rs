use async_trait::async_trait;

use crate::errors::ServiceError;

/// Read-modify-write step run under a key's exclusive lock.
///
/// Receives the current value (`None` if the key was never written) and
/// returns the replacement. An `Err` aborts the transaction with nothing written.
pub type Txn<'a> = Box<dyn FnOnce(Option<&[u8]>) -> Result<Vec<u8>, ServiceError> + Send + 'a>;

/// Box a closure as a `Txn`.
pub fn txn<'a, F>(f: F) -> Txn<'a>
where
    F: FnOnce(Option<&[u8]>) -> Result<Vec<u8>, ServiceError> + Send + 'a,
{
    Box::new(f)
}

/// Trait abstraction for the embedded key-value store.
///
/// Transactions on the same key are serialized; transactions on different
/// keys never wait on each other's `Txn`.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Snapshot of the committed value for `key`.
    async fn view(&self, key: &str) -> Result<Option<Vec<u8>>, ServiceError>;

    /// Run `txn` against `key` and commit its result atomically.
    async fn update(&self, key: &str, txn: Txn<'_>) -> Result<(), ServiceError>;

    /// Release the store. Every later call fails with `ServiceError::StoreClosed`.
    async fn close(&self) -> Result<(), ServiceError>;
}
