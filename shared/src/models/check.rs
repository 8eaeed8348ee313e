//! Check model

use crate::util::now_millis;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A billing snapshot of a subset of a table's orders.
///
/// Immutable once created; appended to the owning table's history and never
/// removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Check {
    orders: Vec<String>,
    created_at: i64,
}

impl Check {
    /// Build a check from a newline-separated list of order descriptions.
    /// Blank lines are dropped; a descriptor with no content is malformed.
    pub fn parse(descriptor: &str) -> Option<Self> {
        let orders: Vec<String> = descriptor
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect();
        if orders.is_empty() {
            return None;
        }
        Some(Self {
            orders,
            created_at: now_millis(),
        })
    }

    pub fn orders(&self) -> &[String] {
        &self.orders
    }

    pub fn created_at(&self) -> i64 {
        self.created_at
    }
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.orders.join("\n"))
    }
}
