//! Ambient helpers shared by the drafts service crates.

pub mod env;
pub mod types;
pub mod utils;
