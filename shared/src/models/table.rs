//! Dining table model

use crate::models::{Check, Order};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TableStatus {
    #[default]
    Ready,
    InUse,
}

impl fmt::Display for TableStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Ready => "READY",
            Self::InUse => "IN_USE",
        };
        f.write_str(s)
    }
}

/// A numbered seat group.
///
/// Holds at most one assigned server (a non-owning lookup key resolved
/// through the storage layer), the open orders keyed by order id, and the
/// append-only check history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub number: u32,
    pub status: TableStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_id: Option<String>,
    orders: BTreeMap<u64, Order>,
    checks: Vec<Check>,
}

impl Table {
    pub fn new(number: u32) -> Self {
        Self {
            number,
            status: TableStatus::Ready,
            server_id: None,
            orders: BTreeMap::new(),
            checks: Vec::new(),
        }
    }

    /// Seat guests: Ready → InUse, binding the server key. Fails when the
    /// table is already in use. Table counts are the caller's concern.
    pub fn set_to_in_use(&mut self, server_id: impl Into<String>) -> bool {
        if self.status != TableStatus::Ready {
            return false;
        }
        self.status = TableStatus::InUse;
        self.server_id = Some(server_id.into());
        true
    }

    /// Vacate: unconditional status reset. The server binding stays until
    /// the table is reassigned or removed.
    pub fn set_to_ready(&mut self) {
        self.status = TableStatus::Ready;
    }

    /// Idempotent upsert by order id.
    pub fn put_order(&mut self, order: Order) {
        self.orders.insert(order.id, order);
    }

    pub fn get_order(&self, order_id: u64) -> Option<&Order> {
        self.orders.get(&order_id)
    }

    pub fn get_order_mut(&mut self, order_id: u64) -> Option<&mut Order> {
        self.orders.get_mut(&order_id)
    }

    /// Remove an order, returning it so the caller can retire its
    /// popularity contributions. `None` for an unknown id.
    pub fn delete_order(&mut self, order_id: u64) -> Option<Order> {
        self.orders.remove(&order_id)
    }

    pub fn orders(&self) -> &BTreeMap<u64, Order> {
        &self.orders
    }

    /// Append a check parsed from a newline-separated order list.
    /// Returns false on a malformed descriptor.
    pub fn add_check(&mut self, descriptor: &str) -> bool {
        match Check::parse(descriptor) {
            Some(check) => {
                self.checks.push(check);
                true
            }
            None => false,
        }
    }

    pub fn checks(&self) -> &[Check] {
        &self.checks
    }

    /// One-line summary for the floor overview.
    pub fn table_info(&self) -> String {
        format!(
            "Table {} [{}] server={} orders={} checks={}",
            self.number,
            self.status,
            self.server_id.as_deref().unwrap_or("-"),
            self.orders.len(),
            self.checks.len(),
        )
    }
}
