//! The fixed four-category menu
//!
//! Orders reference menu items by index; the popularity counters in
//! [`crate::models::RestaurantStatistics`] are sized to these slices.

use serde::{Deserialize, Serialize};

/// Sentinel selection meaning "nothing from this category".
pub const NO_SELECTION: i32 = -1;

pub const DRINKS: &[&str] = &[
    "Still Water",
    "Coffee",
    "Green Tea",
    "Cola",
    "Lemonade",
    "House Red",
];

pub const APPETIZERS: &[&str] = &[
    "Garlic Bread",
    "Soup of the Day",
    "Bruschetta",
    "Fried Calamari",
    "Mixed Olives",
];

pub const MEALS: &[&str] = &[
    "Margherita Pizza",
    "Spaghetti Carbonara",
    "Grilled Salmon",
    "Ribeye Steak",
    "Mushroom Risotto",
    "Half Roast Chicken",
    "Lamb Burger",
    "Seafood Paella",
];

pub const SIDES: &[&str] = &[
    "Fries",
    "Side Salad",
    "Grilled Vegetables",
    "Mashed Potatoes",
    "Steamed Rice",
    "Onion Rings",
];

/// Menu category of an order line selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemCategory {
    Drink,
    Appetizer,
    Meal,
    Side,
}

impl ItemCategory {
    pub const ALL: [Self; 4] = [Self::Drink, Self::Appetizer, Self::Meal, Self::Side];

    /// The fixed menu slice for this category.
    pub fn menu(self) -> &'static [&'static str] {
        match self {
            Self::Drink => DRINKS,
            Self::Appetizer => APPETIZERS,
            Self::Meal => MEALS,
            Self::Side => SIDES,
        }
    }

    /// Whether `index` addresses a real item of this category.
    ///
    /// The [`NO_SELECTION`] sentinel is NOT contained; callers that accept it
    /// must check for it explicitly.
    pub fn contains(self, index: i32) -> bool {
        usize::try_from(index).is_ok_and(|i| i < self.menu().len())
    }

    /// Item name for display; `-` for the sentinel or anything out of range.
    pub fn item_name(self, index: i32) -> &'static str {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.menu().get(i))
            .copied()
            .unwrap_or("-")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_rejects_sentinel_and_out_of_range() {
        assert!(ItemCategory::Drink.contains(0));
        assert!(ItemCategory::Drink.contains(DRINKS.len() as i32 - 1));
        assert!(!ItemCategory::Drink.contains(NO_SELECTION));
        assert!(!ItemCategory::Drink.contains(DRINKS.len() as i32));
    }

    #[test]
    fn item_name_falls_back_to_dash() {
        assert_eq!(ItemCategory::Meal.item_name(0), "Margherita Pizza");
        assert_eq!(ItemCategory::Meal.item_name(NO_SELECTION), "-");
        assert_eq!(ItemCategory::Meal.item_name(99), "-");
    }
}
