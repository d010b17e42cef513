//! Per-owner draft collections.
//!
//! `collection` is pure logic (codec + context uniqueness) with no storage
//! dependency; `store` runs it inside `KvStore` transactions.

pub mod collection;
pub mod repository;
pub mod store;

pub use collection::{owner_key, DraftCollection};
pub use repository::DraftRepository;
pub use store::DraftStore;
