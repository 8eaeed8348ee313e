//! Floor server
//!
//! Single-process restaurant floor management: dining tables, assigned
//! servers, open orders, generated checks and item-popularity statistics,
//! persisted to an embedded store between runs. All operations enter through
//! the [`Restaurant`] facade; management operations are gated behind the
//! floor passcode.

pub mod core;
pub mod floor;
pub mod utils;

// Re-exports
pub use crate::core::config::Config;
pub use crate::floor::restaurant::Restaurant;
pub use crate::floor::storage::{StorageError, StorageResult, StorageSupport};
