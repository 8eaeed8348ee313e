//! Shared types for the floor server
//!
//! Domain models and pure logic used across the workspace: dining tables,
//! servers, orders, checks and the popularity ledger, plus the fixed menu.

pub mod menu;
pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use menu::ItemCategory;
pub use models::{
    Check, Order, OrderPatch, OrderStatus, RestaurantStatistics, Server, Table, TableStatus,
};
