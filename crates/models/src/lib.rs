//! Wire and storage types for drafts.

pub mod draft;
pub mod errors;

pub use draft::{CreateDraftRequest, Draft, DraftData, DraftUpdate, UpdateDraftRequest};
