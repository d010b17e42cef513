//! Storage abstractions for the service layer
//!
//! `KvStore` is the transactional key-value boundary the draft repository
//! is written against. Backends share the per-key slot map in `slots`.

pub mod json_file_store;
pub mod kv_store;
pub mod memory;
mod slots;

pub use json_file_store::JsonFileKv;
pub use kv_store::{txn, KvStore, Txn};
pub use memory::MemoryKv;
