use super::*;
use shared::menu::{self, NO_SELECTION};

const TEST_PASSCODE: &str = "4242";

fn create_test_restaurant() -> Restaurant {
    Restaurant::open_in_memory(TEST_PASSCODE).unwrap()
}

/// Restaurant with a passed authentication gate.
fn authed_restaurant() -> Restaurant {
    let restaurant = create_test_restaurant();
    assert!(restaurant.authenticate(TEST_PASSCODE));
    restaurant
}

/// Authenticated restaurant with `tables` tables and the given roster.
fn setup_floor(tables: i32, servers: &[&str]) -> Restaurant {
    let restaurant = authed_restaurant();
    assert!(restaurant.edit_table_count(tables), "failed to set table count");
    for server in servers {
        assert!(restaurant.add_server(server), "failed to add server {server}");
    }
    restaurant
}

/// Order ids currently open on a table, ascending.
fn order_ids(restaurant: &Restaurant, table: u32) -> Vec<u64> {
    let state = restaurant.state.read();
    state
        .support
        .get_table(table)
        .map(|t| t.orders().keys().copied().collect())
        .unwrap_or_default()
}

/// Pin an order's creation timestamp to make worklist ordering deterministic.
fn set_order_timestamp(restaurant: &Restaurant, table: u32, order_id: u64, created_at: i64) {
    let mut state = restaurant.state.write();
    let order = state
        .support
        .get_table_mut(table)
        .and_then(|t| t.get_order_mut(order_id))
        .expect("order to pin");
    order.created_at = created_at;
}

fn popularity(restaurant: &Restaurant, category: ItemCategory, index: i32) -> u32 {
    restaurant.check_item_popularity(category, index).unwrap()
}

fn server_table_count(restaurant: &Restaurant, server_id: &str) -> u32 {
    let state = restaurant.state.read();
    state
        .support
        .get_server(server_id)
        .map(Server::table_count)
        .expect("known server")
}

mod test_boundary;
