//! Restaurant statistics ledger
//!
//! The durable counters reloaded at startup: the next order id, the table
//! count and the per-item popularity tallies for the four menu categories.
//! Owned by the facade and passed `&mut` wherever mutation happens; never
//! ambient global state.

use crate::menu::{self, ItemCategory};
use serde::{Deserialize, Serialize};

/// Sentinel table count meaning "never configured".
pub const TABLE_COUNT_UNSET: i32 = -1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestaurantStatistics {
    /// Next order id to issue; strictly greater than every id ever issued.
    next_order_id: u64,
    /// Configured table count, [`TABLE_COUNT_UNSET`] on first run.
    table_count: i32,
    drink_counts: Vec<u32>,
    appetizer_counts: Vec<u32>,
    meal_counts: Vec<u32>,
    side_counts: Vec<u32>,
}

impl Default for RestaurantStatistics {
    fn default() -> Self {
        Self {
            next_order_id: 1,
            table_count: TABLE_COUNT_UNSET,
            drink_counts: vec![0; menu::DRINKS.len()],
            appetizer_counts: vec![0; menu::APPETIZERS.len()],
            meal_counts: vec![0; menu::MEALS.len()],
            side_counts: vec![0; menu::SIDES.len()],
        }
    }
}

impl RestaurantStatistics {
    /// Next order id to issue.
    pub fn order_id(&self) -> u64 {
        self.next_order_id
    }

    /// Advance the order id counter. Values below the current counter are
    /// rejected without change; ids are never reused.
    pub fn update_order_id(&mut self, id: u64) -> bool {
        if id < self.next_order_id {
            tracing::warn!(id, current = self.next_order_id, "rejected order id rollback");
            return false;
        }
        self.next_order_id = id;
        true
    }

    pub fn table_count(&self) -> i32 {
        self.table_count
    }

    /// Record a new table count. Rejects negative counts and returns false
    /// on an unchanged value so callers can skip a redundant resize.
    pub fn update_table_count(&mut self, count: i32) -> bool {
        if count < 0 || count == self.table_count {
            return false;
        }
        self.table_count = count;
        true
    }

    pub fn update_drink_count(&mut self, index: i32, increment: bool) -> bool {
        self.update_count(ItemCategory::Drink, index, increment)
    }

    pub fn update_appetizer_count(&mut self, index: i32, increment: bool) -> bool {
        self.update_count(ItemCategory::Appetizer, index, increment)
    }

    pub fn update_meal_count(&mut self, index: i32, increment: bool) -> bool {
        self.update_count(ItemCategory::Meal, index, increment)
    }

    pub fn update_side_count(&mut self, index: i32, increment: bool) -> bool {
        self.update_count(ItemCategory::Side, index, increment)
    }

    /// Adjust one popularity counter. An index outside the category's menu
    /// (including the no-selection sentinel) is a failure-returning no-op.
    pub fn update_count(&mut self, category: ItemCategory, index: i32, increment: bool) -> bool {
        let Ok(index) = usize::try_from(index) else {
            return false;
        };
        let Some(slot) = self.counts_mut(category).get_mut(index) else {
            return false;
        };
        if increment {
            *slot += 1;
        } else if *slot == 0 {
            // Counter drift guard: decrements must pair with earlier increments.
            tracing::warn!(?category, index, "popularity counter underflow");
        } else {
            *slot -= 1;
        }
        true
    }

    /// Popularity of one menu item; `None` out of range.
    pub fn count(&self, category: ItemCategory, index: i32) -> Option<u32> {
        let index = usize::try_from(index).ok()?;
        self.counts(category).get(index).copied()
    }

    /// Persisted counters may predate a menu edit; pad missing slots with
    /// zero and drop slots past the current menu length.
    pub fn resize_to_menu(&mut self) {
        self.drink_counts.resize(menu::DRINKS.len(), 0);
        self.appetizer_counts.resize(menu::APPETIZERS.len(), 0);
        self.meal_counts.resize(menu::MEALS.len(), 0);
        self.side_counts.resize(menu::SIDES.len(), 0);
    }

    fn counts(&self, category: ItemCategory) -> &[u32] {
        match category {
            ItemCategory::Drink => &self.drink_counts,
            ItemCategory::Appetizer => &self.appetizer_counts,
            ItemCategory::Meal => &self.meal_counts,
            ItemCategory::Side => &self.side_counts,
        }
    }

    fn counts_mut(&mut self, category: ItemCategory) -> &mut [u32] {
        match category {
            ItemCategory::Drink => &mut self.drink_counts,
            ItemCategory::Appetizer => &mut self.appetizer_counts,
            ItemCategory::Meal => &mut self.meal_counts,
            ItemCategory::Side => &mut self.side_counts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::NO_SELECTION;

    #[test]
    fn order_id_never_rolls_back() {
        let mut stats = RestaurantStatistics::default();
        assert_eq!(stats.order_id(), 1);
        assert!(stats.update_order_id(5));
        assert!(!stats.update_order_id(3));
        assert_eq!(stats.order_id(), 5);
        // Equal value is accepted (no decrease).
        assert!(stats.update_order_id(5));
    }

    #[test]
    fn table_count_rejects_negative_and_unchanged() {
        let mut stats = RestaurantStatistics::default();
        assert_eq!(stats.table_count(), TABLE_COUNT_UNSET);
        assert!(!stats.update_table_count(-3));
        assert!(stats.update_table_count(4));
        assert!(!stats.update_table_count(4));
        assert_eq!(stats.table_count(), 4);
    }

    #[test]
    fn counters_ignore_sentinel_and_out_of_range() {
        let mut stats = RestaurantStatistics::default();
        assert!(!stats.update_drink_count(NO_SELECTION, true));
        assert!(!stats.update_drink_count(999, true));
        assert!(stats.update_drink_count(1, true));
        assert_eq!(stats.count(ItemCategory::Drink, 1), Some(1));
        assert_eq!(stats.count(ItemCategory::Drink, 999), None);
    }

    #[test]
    fn decrement_saturates_at_zero() {
        let mut stats = RestaurantStatistics::default();
        assert!(stats.update_meal_count(0, false));
        assert_eq!(stats.count(ItemCategory::Meal, 0), Some(0));
    }

    #[test]
    fn resize_pads_short_counter_arrays() {
        let mut stats = RestaurantStatistics::default();
        stats.side_counts.truncate(1);
        stats.resize_to_menu();
        assert_eq!(stats.side_counts.len(), menu::SIDES.len());
    }
}
