use super::*;

#[test]
fn test_negative_table_count_rejected() {
    let restaurant = authed_restaurant();
    assert!(!restaurant.edit_table_count(-1));
    assert_eq!(restaurant.get_table_info(1), None);
}

#[test]
fn test_zero_table_count_clears_the_floor() {
    let restaurant = setup_floor(3, &[]);
    assert!(restaurant.edit_table_count(0));
    assert!(restaurant.get_table_info(1).is_none());
    // And the floor can be rebuilt afterwards.
    assert!(restaurant.edit_table_count(2));
    assert!(restaurant.get_table_info(2).is_some());
}

#[test]
fn test_order_with_no_selections_counts_nothing() {
    let restaurant = setup_floor(1, &[]);
    assert!(restaurant.create_order(
        1,
        NO_SELECTION,
        NO_SELECTION,
        NO_SELECTION,
        NO_SELECTION,
        "just water"
    ));
    assert_eq!(order_ids(&restaurant, 1), vec![1]);
    for category in ItemCategory::ALL {
        for index in 0..category.menu().len() as i32 {
            assert_eq!(popularity(&restaurant, category, index), 0);
        }
    }
}

#[test]
fn test_out_of_range_selection_is_not_counted() {
    let restaurant = setup_floor(1, &[]);
    // The order is still placed; the bogus index simply contributes nothing.
    assert!(restaurant.create_order(1, 99, 0, 2, 3, ""));
    assert_eq!(restaurant.check_item_popularity(ItemCategory::Drink, 99), None);
    assert_eq!(popularity(&restaurant, ItemCategory::Appetizer, 0), 1);
}

#[test]
fn test_modify_order_rejects_out_of_range_index() {
    let restaurant = setup_floor(1, &[]);
    assert!(restaurant.create_order(1, 0, 1, 2, 3, ""));

    assert!(!restaurant.modify_order(1, 1, OrderPatch::Meal(menu::MEALS.len() as i32)));
    assert!(!restaurant.modify_order(1, 1, OrderPatch::Side(-7)));

    // Nothing moved.
    assert_eq!(popularity(&restaurant, ItemCategory::Meal, 2), 1);
    assert_eq!(popularity(&restaurant, ItemCategory::Side, 3), 1);
}

#[test]
fn test_modify_order_unknown_targets() {
    let restaurant = setup_floor(1, &[]);
    assert!(!restaurant.modify_order(1, 1, OrderPatch::Drink(0)));
    assert!(!restaurant.modify_order(9, 1, OrderPatch::Drink(0)));
}

#[test]
fn test_change_table_server_fails_fast_without_current_server() {
    let restaurant = setup_floor(2, &["alice"]);
    // Table 1 has never been seated: nothing to reassign.
    assert!(!restaurant.change_table_server(1, "alice"));
    assert_eq!(server_table_count(&restaurant, "alice"), 0);

    assert!(!restaurant.change_table_server(9, "alice"));
    assert!(restaurant.set_table_to_in_use(1, "alice"));
    assert!(!restaurant.change_table_server(1, "nobody"));

    // Reassigning to the same server is a harmless no-op.
    assert!(restaurant.change_table_server(1, "alice"));
    assert_eq!(server_table_count(&restaurant, "alice"), 1);
}

#[test]
fn test_seating_requires_known_table_and_server() {
    let restaurant = setup_floor(1, &["alice"]);
    assert!(!restaurant.set_table_to_in_use(1, "nobody"));
    assert!(!restaurant.set_table_to_in_use(9, "alice"));
    assert!(!restaurant.set_table_to_ready(9));
}

#[test]
fn test_blank_inputs_rejected() {
    let restaurant = setup_floor(0, &["alice"]);
    assert!(!restaurant.add_server(""));
    assert!(!restaurant.add_server("   "));
    assert!(!restaurant.submit_feedback("alice", "  ", true));
    assert!(!restaurant.submit_feedback("nobody", "fine", true));
}

#[test]
fn test_check_queries_on_unknown_table() {
    let restaurant = setup_floor(1, &[]);
    assert!(!restaurant.generate_checks(9, &["Order #1".to_string()]));
    assert!(restaurant.get_tables_checks(9).is_none());
    assert!(restaurant.get_tables_orders(9).is_none());
}

#[test]
fn test_worklist_empty_without_ordered_orders() {
    let restaurant = setup_floor(2, &[]);
    assert!(restaurant.obtain_order_list_by_creation().is_empty());

    assert!(restaurant.create_order(1, 0, 1, 2, 3, ""));
    assert!(restaurant.modify_order(1, 1, OrderPatch::Status(OrderStatus::Completed)));
    assert!(restaurant.obtain_order_list_by_creation().is_empty());
}
