//! Service layer owning the per-owner draft collections.
//! - `drafts` holds the collection codec and the repository operations.
//! - `storage` holds the transactional key-value abstraction and its backends.
//! - Store operations never log; failures are returned as `ServiceError`.

pub mod errors;
pub mod drafts;
pub mod runtime;
pub mod storage;
