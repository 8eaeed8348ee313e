//! Order model
//!
//! A line-item bundle created against a table: one selection per menu
//! category (or the no-selection sentinel), a free-text special request, a
//! status and a creation timestamp. Category selections must change through
//! [`Order::apply`] so the popularity counters stay balanced.

use crate::menu::{ItemCategory, NO_SELECTION};
use crate::models::RestaurantStatistics;
use crate::util::now_millis;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Newly placed; feeds the creation-ordered kitchen worklist.
    #[default]
    Ordered,
    Modified,
    Completed,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Ordered => "ORDERED",
            Self::Modified => "MODIFIED",
            Self::Completed => "COMPLETED",
        };
        f.write_str(s)
    }
}

/// One mutable field of an order.
///
/// A closed enumeration instead of name-string dispatch, so an unknown field
/// is unrepresentable and every match is checked at compile time.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderPatch {
    Drink(i32),
    Appetizer(i32),
    Meal(i32),
    Side(i32),
    Special(String),
    Status(OrderStatus),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Unique, monotonically assigned, never reused.
    pub id: u64,
    pub drink: i32,
    pub appetizer: i32,
    pub meal: i32,
    pub side: i32,
    pub special: String,
    pub status: OrderStatus,
    /// Creation timestamp (millis); drives the kitchen worklist ordering.
    pub created_at: i64,
}

impl Order {
    pub fn new(
        id: u64,
        drink: i32,
        appetizer: i32,
        meal: i32,
        side: i32,
        special: impl Into<String>,
    ) -> Self {
        Self {
            id,
            drink,
            appetizer,
            meal,
            side,
            special: special.into(),
            status: OrderStatus::Ordered,
            created_at: now_millis(),
        }
    }

    /// The four category selections, sentinel included.
    pub fn selections(&self) -> [(ItemCategory, i32); 4] {
        [
            (ItemCategory::Drink, self.drink),
            (ItemCategory::Appetizer, self.appetizer),
            (ItemCategory::Meal, self.meal),
            (ItemCategory::Side, self.side),
        ]
    }

    /// Apply one field update.
    ///
    /// Category selections are validated before anything changes, then the
    /// old index's popularity counter is released and the new one claimed,
    /// keeping "category counters == items currently on open orders" intact.
    /// Returns false (order and statistics untouched) for an out-of-range
    /// index.
    pub fn apply(&mut self, patch: OrderPatch, stats: &mut RestaurantStatistics) -> bool {
        match patch {
            OrderPatch::Drink(index) => {
                Self::swap_selection(ItemCategory::Drink, &mut self.drink, index, stats)
            }
            OrderPatch::Appetizer(index) => {
                Self::swap_selection(ItemCategory::Appetizer, &mut self.appetizer, index, stats)
            }
            OrderPatch::Meal(index) => {
                Self::swap_selection(ItemCategory::Meal, &mut self.meal, index, stats)
            }
            OrderPatch::Side(index) => {
                Self::swap_selection(ItemCategory::Side, &mut self.side, index, stats)
            }
            OrderPatch::Special(text) => {
                self.special = text;
                true
            }
            OrderPatch::Status(status) => {
                self.status = status;
                true
            }
        }
    }

    fn swap_selection(
        category: ItemCategory,
        slot: &mut i32,
        new: i32,
        stats: &mut RestaurantStatistics,
    ) -> bool {
        if new != NO_SELECTION && !category.contains(new) {
            return false;
        }
        if *slot == new {
            // Same selection again must not double-count.
            return true;
        }
        stats.update_count(category, *slot, false);
        stats.update_count(category, new, true);
        *slot = new;
        true
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} [{}] drink={} appetizer={} meal={} side={}",
            self.id,
            self.status,
            ItemCategory::Drink.item_name(self.drink),
            ItemCategory::Appetizer.item_name(self.appetizer),
            ItemCategory::Meal.item_name(self.meal),
            ItemCategory::Side.item_name(self.side),
        )?;
        if !self.special.is_empty() {
            write!(f, " note=\"{}\"", self.special)?;
        }
        Ok(())
    }
}
