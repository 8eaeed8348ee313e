//! Restaurant facade - the single entry point for every floor operation
//!
//! # Operation flow
//!
//! ```text
//! operation(args)
//!     ├─ 1. Take the graph lock (write for mutators, read for queries)
//!     ├─ 2. Authorize (management operations only)
//!     ├─ 3. Resolve entities through StorageSupport
//!     ├─ 4. Mutate the entity graph
//!     ├─ 5. Update the statistics ledger where affected
//!     └─ 6. Return bool (mutators) or Option/sequence (queries)
//! ```
//!
//! Management operations (`edit_table_count`, `add_server`, `delete_server`)
//! require a prior successful `authenticate`; floor operations (orders,
//! checks, feedback, queries) do not. One exclusive lock guards the whole
//! entity graph because the cross-entity invariants (server/table count
//! symmetry, order-id monotonicity, category-counter sums) are not safely
//! updatable piecewise.
//!
//! Persistence is an explicit flush: callers invoke [`Restaurant::dump_to_file`]
//! at controlled checkpoints (the binary does so on shutdown).

use crate::core::config::Config;
use crate::floor::storage::{StorageResult, StorageSupport};
use parking_lot::RwLock;
use shared::menu::ItemCategory;
use shared::models::{Check, Order, OrderPatch, OrderStatus, RestaurantStatistics, Server, Table};
use std::fmt::Write as _;

struct FloorState {
    support: StorageSupport,
    stats: RestaurantStatistics,
    authenticated: bool,
}

/// The floor-management facade.
pub struct Restaurant {
    state: RwLock<FloorState>,
}

impl Restaurant {
    /// Open the backing store and load the floor state. The only operation
    /// besides [`Self::dump_to_file`] that surfaces a typed error; everything
    /// after a successful open speaks the boolean vocabulary.
    pub fn open(config: &Config) -> StorageResult<Self> {
        let (support, stats) = StorageSupport::open(config)?;
        tracing::info!(
            tables = support.tables().count(),
            servers = support.servers().count(),
            next_order_id = stats.order_id(),
            "floor state loaded"
        );
        Ok(Self {
            state: RwLock::new(FloorState {
                support,
                stats,
                authenticated: false,
            }),
        })
    }

    /// In-memory variant (for testing)
    #[cfg(test)]
    pub fn open_in_memory(passcode: &str) -> StorageResult<Self> {
        let (support, stats) = StorageSupport::open_in_memory(passcode)?;
        Ok(Self {
            state: RwLock::new(FloorState {
                support,
                stats,
                authenticated: false,
            }),
        })
    }

    // ========== Authentication ==========

    /// Check the passcode and remember the outcome for this session.
    pub fn authenticate(&self, passcode: &str) -> bool {
        let mut state = self.state.write();
        state.authenticated = state.support.authenticate_passcode(passcode);
        if !state.authenticated {
            tracing::warn!("authentication failed");
        }
        state.authenticated
    }

    // ========== Management Operations (auth-gated) ==========

    /// Resize the floor to exactly `new_count` tables numbered 1..=n.
    /// Growth appends Ready tables; shrink removes the highest-numbered
    /// tables first, settling their server assignments and retiring their
    /// orders' popularity contributions. Storage and statistics move
    /// together under the graph lock. An unchanged count is a successful
    /// no-op.
    pub fn edit_table_count(&self, new_count: i32) -> bool {
        let mut state = self.state.write();
        if !state.authenticated {
            tracing::warn!("edit_table_count refused: not authenticated");
            return false;
        }
        if new_count < 0 {
            tracing::warn!(new_count, "edit_table_count refused: negative count");
            return false;
        }
        let FloorState { support, stats, .. } = &mut *state;
        let current = stats.table_count();
        if current == new_count {
            tracing::debug!(new_count, "table count unchanged");
            return true;
        }
        // -1 means never configured: same floor plan as zero tables.
        let old = current.max(0) as u32;
        let target = new_count as u32;
        if target > old {
            // Pre-check keeps the apply phase infallible, so storage and
            // statistics cannot end up disagreeing on the count.
            if (old + 1..=target).any(|n| support.get_table(n).is_some()) {
                tracing::error!("table numbering out of sync with statistics");
                return false;
            }
            for number in old + 1..=target {
                support.put_table(Table::new(number));
            }
        } else {
            for number in (target + 1..=old).rev() {
                let Some(removed) = support.delete_table(number) else {
                    tracing::error!(number, "table numbering out of sync with statistics");
                    return false;
                };
                Self::retire_table(support, stats, &removed);
            }
        }
        stats.update_table_count(new_count);
        tracing::info!(from = current, to = new_count, "table count updated");
        true
    }

    /// Add a server to the roster.
    pub fn add_server(&self, server_id: &str) -> bool {
        let mut state = self.state.write();
        if !state.authenticated {
            tracing::warn!("add_server refused: not authenticated");
            return false;
        }
        if server_id.trim().is_empty() {
            tracing::warn!("add_server refused: blank id");
            return false;
        }
        if !state.support.put_server(Server::new(server_id)) {
            tracing::warn!(server_id = %server_id, "add_server refused: id already taken");
            return false;
        }
        tracing::info!(server_id = %server_id, "server added");
        true
    }

    /// Remove a server from the roster. Refused while any table still
    /// references the server.
    pub fn delete_server(&self, server_id: &str) -> bool {
        let mut state = self.state.write();
        if !state.authenticated {
            tracing::warn!("delete_server refused: not authenticated");
            return false;
        }
        let deleted = state.support.delete_server(server_id);
        if deleted {
            tracing::info!(server_id = %server_id, "server deleted");
        }
        deleted
    }

    // ========== Table Operations ==========

    pub fn get_table_info(&self, number: u32) -> Option<String> {
        let state = self.state.read();
        state.support.get_table(number).map(Table::table_info)
    }

    /// Reassign a table to another server, moving one table-count between
    /// the two. Fails for an unknown table or server, and fails fast when
    /// the table has no current server (assign one via
    /// [`Self::set_table_to_in_use`] first).
    pub fn change_table_server(&self, number: u32, new_server_id: &str) -> bool {
        let mut state = self.state.write();
        let FloorState { support, .. } = &mut *state;
        let Some(current) = support.get_table(number).map(|t| t.server_id.clone()) else {
            tracing::warn!(table = number, "change_table_server refused: unknown table");
            return false;
        };
        let Some(current_id) = current else {
            tracing::warn!(table = number, "change_table_server refused: table has no server");
            return false;
        };
        if support.get_server(new_server_id).is_none() {
            tracing::warn!(server_id = %new_server_id, "change_table_server refused: unknown server");
            return false;
        }
        if current_id == new_server_id {
            return true;
        }
        if let Some(server) = support.get_server_mut(&current_id) {
            server.decrement_table_count();
        }
        if let Some(server) = support.get_server_mut(new_server_id) {
            server.increment_table_count();
        }
        if let Some(table) = support.get_table_mut(number) {
            table.server_id = Some(new_server_id.to_string());
        }
        tracing::debug!(table = number, from = %current_id, to = %new_server_id, "table reassigned");
        true
    }

    /// Seat guests at a table under the given server.
    pub fn set_table_to_in_use(&self, number: u32, server_id: &str) -> bool {
        let mut state = self.state.write();
        let FloorState { support, .. } = &mut *state;
        if support.get_server(server_id).is_none() {
            tracing::warn!(server_id = %server_id, "set_table_to_in_use refused: unknown server");
            return false;
        }
        let Some(table) = support.get_table_mut(number) else {
            tracing::warn!(table = number, "set_table_to_in_use refused: unknown table");
            return false;
        };
        let previous = table.server_id.clone();
        if !table.set_to_in_use(server_id) {
            tracing::warn!(table = number, "set_table_to_in_use refused: table already in use");
            return false;
        }
        if previous.as_deref() != Some(server_id) {
            if let Some(previous_id) = previous
                && let Some(server) = support.get_server_mut(&previous_id)
            {
                server.decrement_table_count();
            }
            if let Some(server) = support.get_server_mut(server_id) {
                server.increment_table_count();
            }
        }
        tracing::debug!(table = number, server_id = %server_id, "table in use");
        true
    }

    /// Vacate a table. The server keeps the table in their section until it
    /// is reassigned or removed.
    pub fn set_table_to_ready(&self, number: u32) -> bool {
        let mut state = self.state.write();
        match state.support.get_table_mut(number) {
            Some(table) => {
                table.set_to_ready();
                true
            }
            None => false,
        }
    }

    // ========== Server Queries & Feedback ==========

    /// Table numbers currently in the server's section.
    pub fn get_server_tables(&self, server_id: &str) -> Option<String> {
        let state = self.state.read();
        state.support.get_server(server_id)?;
        let numbers: Vec<String> = state
            .support
            .tables()
            .filter(|table| table.server_id.as_deref() == Some(server_id))
            .map(|table| table.number.to_string())
            .collect();
        Some(format!("Server {} tables: {}", server_id, numbers.join(" ")))
    }

    pub fn submit_feedback(&self, server_id: &str, text: &str, positive: bool) -> bool {
        let mut state = self.state.write();
        match state.support.get_server_mut(server_id) {
            Some(server) => server.submit_feedback(text, positive),
            None => {
                tracing::warn!(server_id = %server_id, "submit_feedback refused: unknown server");
                false
            }
        }
    }

    /// Feedback log for a server, readable in any authentication state.
    pub fn get_server_feedback(&self, server_id: &str) -> Option<String> {
        let state = self.state.read();
        state
            .support
            .get_server(server_id)
            .map(Server::feedback_report)
    }

    /// Every server with the number of tables they are servicing.
    pub fn get_servers_and_number_of_tables(&self) -> String {
        let state = self.state.read();
        let mut out = String::new();
        for server in state.support.servers() {
            let _ = writeln!(out, "Server ID: {}", server.id);
            let _ = writeln!(out, "Servicing: {} tables.", server.table_count());
            let _ = writeln!(out);
        }
        out
    }

    // ========== Order Operations ==========

    /// Place an order against a table: allocate the next order id, claim
    /// the four popularity counters (sentinel or out-of-range selections
    /// contribute nothing) and insert. Fails only for an unknown table.
    pub fn create_order(
        &self,
        number: u32,
        drink: i32,
        appetizer: i32,
        meal: i32,
        side: i32,
        special: &str,
    ) -> bool {
        let mut state = self.state.write();
        let FloorState { support, stats, .. } = &mut *state;
        if support.get_table(number).is_none() {
            tracing::warn!(table = number, "create_order refused: unknown table");
            return false;
        }
        let id = stats.order_id();
        stats.update_order_id(id + 1);
        stats.update_drink_count(drink, true);
        stats.update_appetizer_count(appetizer, true);
        stats.update_meal_count(meal, true);
        stats.update_side_count(side, true);
        let order = Order::new(id, drink, appetizer, meal, side, special);
        if let Some(table) = support.get_table_mut(number) {
            table.put_order(order);
        }
        tracing::info!(order_id = id, table = number, "order created");
        true
    }

    /// Apply one field update to an order; category selections re-balance
    /// the popularity counters atomically with the change.
    pub fn modify_order(&self, number: u32, order_id: u64, patch: OrderPatch) -> bool {
        let mut state = self.state.write();
        let FloorState { support, stats, .. } = &mut *state;
        let Some(table) = support.get_table_mut(number) else {
            tracing::warn!(table = number, "modify_order refused: unknown table");
            return false;
        };
        let Some(order) = table.get_order_mut(order_id) else {
            tracing::warn!(table = number, order_id, "modify_order refused: unknown order");
            return false;
        };
        let applied = order.apply(patch, stats);
        if applied {
            tracing::debug!(table = number, order_id, "order modified");
        }
        applied
    }

    /// Remove an order from a table and retire its popularity
    /// contributions.
    pub fn delete_order(&self, number: u32, order_id: u64) -> bool {
        let mut state = self.state.write();
        let FloorState { support, stats, .. } = &mut *state;
        let Some(table) = support.get_table_mut(number) else {
            return false;
        };
        match table.delete_order(order_id) {
            Some(removed) => {
                Self::retire_order(stats, &removed);
                tracing::debug!(table = number, order_id, "order deleted");
                true
            }
            None => false,
        }
    }

    /// The kitchen worklist: every order still in `Ordered` status across
    /// all tables, ascending by creation timestamp. Ties keep discovery
    /// order (table number, then order id) thanks to the stable sort.
    pub fn obtain_order_list_by_creation(&self) -> Vec<Order> {
        let state = self.state.read();
        let mut orders: Vec<Order> = state
            .support
            .tables()
            .flat_map(|table| table.orders().values())
            .filter(|order| order.status == OrderStatus::Ordered)
            .cloned()
            .collect();
        orders.sort_by_key(|order| order.created_at);
        orders
    }

    pub fn get_tables_orders(&self, number: u32) -> Option<String> {
        let state = self.state.read();
        let table = state.support.get_table(number)?;
        let mut out = String::new();
        for order in table.orders().values() {
            let _ = writeln!(out, "Order: {}", order);
        }
        Some(out)
    }

    // ========== Checks ==========

    /// Bill a table: append one check per descriptor. The whole batch is
    /// validated before anything is appended, so a malformed descriptor
    /// leaves the history untouched.
    pub fn generate_checks(&self, number: u32, descriptors: &[String]) -> bool {
        let mut state = self.state.write();
        let Some(table) = state.support.get_table_mut(number) else {
            tracing::warn!(table = number, "generate_checks refused: unknown table");
            return false;
        };
        if descriptors.iter().any(|d| Check::parse(d).is_none()) {
            tracing::warn!(table = number, "generate_checks refused: malformed descriptor");
            return false;
        }
        for descriptor in descriptors {
            table.add_check(descriptor);
        }
        tracing::debug!(table = number, checks = descriptors.len(), "checks generated");
        true
    }

    pub fn get_tables_checks(&self, number: u32) -> Option<String> {
        let state = self.state.read();
        let table = state.support.get_table(number)?;
        let mut out = String::new();
        for (i, check) in table.checks().iter().enumerate() {
            let _ = writeln!(out, "Check {}:", i + 1);
            let _ = writeln!(out, "{}", check);
        }
        Some(out)
    }

    // ========== Statistics ==========

    /// Popularity of one menu item; `None` out of range.
    pub fn check_item_popularity(&self, category: ItemCategory, index: i32) -> Option<u32> {
        self.state.read().stats.count(category, index)
    }

    // ========== Persistence ==========

    /// Flush the full floor snapshot to the backing store. Failure here is
    /// data loss on the next load, not a session-fatal condition; callers
    /// decide whether to retry.
    pub fn dump_to_file(&self) -> StorageResult<()> {
        let state = self.state.read();
        state.support.dump_to_file(&state.stats)
    }

    // ========== Internal ==========

    fn retire_order(stats: &mut RestaurantStatistics, order: &Order) {
        for (category, index) in order.selections() {
            stats.update_count(category, index, false);
        }
    }

    /// Settle a removed table: release its server assignment and the
    /// popularity contributions of every order it still held.
    fn retire_table(support: &mut StorageSupport, stats: &mut RestaurantStatistics, removed: &Table) {
        if let Some(server_id) = removed.server_id.as_deref()
            && let Some(server) = support.get_server_mut(server_id)
        {
            server.decrement_table_count();
        }
        for order in removed.orders().values() {
            Self::retire_order(stats, order);
        }
    }
}

#[cfg(test)]
mod tests;
