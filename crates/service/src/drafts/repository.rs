use async_trait::async_trait;
use models::{Draft, DraftUpdate};

use crate::errors::ServiceError;

/// Repository abstraction for per-owner draft collections.
///
/// Every call is one transaction on the owner's collection.
#[async_trait]
pub trait DraftRepository: Send + Sync {
    /// Whole collection of `id`. `NotFound` if the owner never stored a draft.
    async fn list(&self, id: i64) -> Result<Vec<Draft>, ServiceError>;
    async fn get(&self, id: i64, context: &str) -> Result<Draft, ServiceError>;
    /// Insert-if-absent by context; `DuplicateValue` leaves the collection untouched.
    async fn create(&self, draft: Draft) -> Result<(), ServiceError>;
    async fn delete(&self, id: i64, context: &str) -> Result<(), ServiceError>;
    /// Overwrites `type` and `data` only and returns the stored result.
    async fn update(&self, update: DraftUpdate) -> Result<Draft, ServiceError>;
}
