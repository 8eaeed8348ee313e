//! redb-backed persistence for the floor state
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `tables` | table number | JSON `Table` | Dining table collection |
//! | `servers` | server id | JSON `Server` | Wait staff collection |
//! | `meta` | `statistics` / `passcode` | JSON | Counter ledger + passcode |
//!
//! # Durability
//!
//! Loading happens once, in a single read transaction; dumping rewrites the
//! full snapshot in a single write transaction. A load after a crash
//! therefore observes either the previous snapshot or the new one, never a
//! mix. redb commits are persistent as soon as `commit()` returns.

use crate::core::config::Config;
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use sha2::{Digest, Sha256};
use shared::models::{RestaurantStatistics, Server, Table};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Dining tables: key = table number, value = JSON-serialized Table
const TABLES_TABLE: TableDefinition<u32, &[u8]> = TableDefinition::new("tables");

/// Servers: key = server id, value = JSON-serialized Server
const SERVERS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("servers");

/// Singletons: statistics ledger and passcode, JSON-serialized
const META_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("meta");

const STATISTICS_KEY: &str = "statistics";
const PASSCODE_KEY: &str = "passcode";

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Snapshot read at startup. Empty/absent entries mean a first run.
struct LoadedSnapshot {
    tables: BTreeMap<u32, Table>,
    servers: BTreeMap<String, Server>,
    passcode: Option<String>,
    statistics: Option<RestaurantStatistics>,
}

/// Snapshot store backed by redb
#[derive(Clone)]
pub struct FloorStore {
    db: Arc<Database>,
}

impl FloorStore {
    /// Open or create the store at the given path.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;

        // Create all tables up front so later reads never miss
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(TABLES_TABLE)?;
            let _ = write_txn.open_table(SERVERS_TABLE)?;
            let _ = write_txn.open_table(META_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Open an in-memory store (for testing)
    #[cfg(test)]
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;

        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(TABLES_TABLE)?;
            let _ = write_txn.open_table(SERVERS_TABLE)?;
            let _ = write_txn.open_table(META_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Read the complete snapshot in one transaction.
    fn load(&self) -> StorageResult<LoadedSnapshot> {
        let read_txn = self.db.begin_read()?;

        let mut tables = BTreeMap::new();
        let tables_table = read_txn.open_table(TABLES_TABLE)?;
        for result in tables_table.iter()? {
            let (key, value) = result?;
            let table: Table = serde_json::from_slice(value.value())?;
            tables.insert(key.value(), table);
        }

        let mut servers = BTreeMap::new();
        let servers_table = read_txn.open_table(SERVERS_TABLE)?;
        for result in servers_table.iter()? {
            let (key, value) = result?;
            let server: Server = serde_json::from_slice(value.value())?;
            servers.insert(key.value().to_string(), server);
        }

        let meta_table = read_txn.open_table(META_TABLE)?;
        let statistics = match meta_table.get(STATISTICS_KEY)? {
            Some(value) => Some(serde_json::from_slice(value.value())?),
            None => None,
        };
        let passcode = match meta_table.get(PASSCODE_KEY)? {
            Some(value) => Some(serde_json::from_slice(value.value())?),
            None => None,
        };

        Ok(LoadedSnapshot {
            tables,
            servers,
            passcode,
            statistics,
        })
    }

    /// Rewrite the full snapshot in one transaction.
    fn dump(
        &self,
        tables: &BTreeMap<u32, Table>,
        servers: &BTreeMap<String, Server>,
        passcode: &str,
        statistics: &RestaurantStatistics,
    ) -> StorageResult<()> {
        let txn = self.db.begin_write()?;
        txn.delete_table(TABLES_TABLE)?;
        txn.delete_table(SERVERS_TABLE)?;
        txn.delete_table(META_TABLE)?;
        {
            let mut out = txn.open_table(TABLES_TABLE)?;
            for (number, table) in tables {
                out.insert(number, serde_json::to_vec(table)?.as_slice())?;
            }
        }
        {
            let mut out = txn.open_table(SERVERS_TABLE)?;
            for (id, server) in servers {
                out.insert(id.as_str(), serde_json::to_vec(server)?.as_slice())?;
            }
        }
        {
            let mut out = txn.open_table(META_TABLE)?;
            out.insert(STATISTICS_KEY, serde_json::to_vec(statistics)?.as_slice())?;
            out.insert(PASSCODE_KEY, serde_json::to_vec(passcode)?.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }
}

/// Persistence and lookup layer owning the entity collections.
///
/// Invariants: every server id held by a table resolves in the server
/// collection, and every server's table count equals the number of tables
/// referencing it. The facade maintains the counts; this layer protects the
/// reference side by refusing to delete a server that is still assigned.
pub struct StorageSupport {
    store: FloorStore,
    tables: BTreeMap<u32, Table>,
    servers: BTreeMap<String, Server>,
    passcode: String,
}

impl StorageSupport {
    /// Open the store and load the full snapshot, or start from the defined
    /// first-run state: empty collections, default statistics, and the
    /// bootstrap passcode from the configuration installed as the stored
    /// passcode.
    pub fn open(config: &Config) -> StorageResult<(Self, RestaurantStatistics)> {
        let store = FloorStore::open(config.data_path())?;
        Self::from_store(store, &config.bootstrap_passcode)
    }

    /// In-memory variant (for testing)
    #[cfg(test)]
    pub fn open_in_memory(bootstrap_passcode: &str) -> StorageResult<(Self, RestaurantStatistics)> {
        let store = FloorStore::open_in_memory()?;
        Self::from_store(store, bootstrap_passcode)
    }

    fn from_store(
        store: FloorStore,
        bootstrap_passcode: &str,
    ) -> StorageResult<(Self, RestaurantStatistics)> {
        let snapshot = store.load()?;
        let mut statistics = snapshot.statistics.unwrap_or_default();
        statistics.resize_to_menu();
        let passcode = match snapshot.passcode {
            Some(code) => code,
            None => {
                tracing::info!("no stored passcode, installing bootstrap passcode");
                bootstrap_passcode.to_string()
            }
        };
        let support = Self {
            store,
            tables: snapshot.tables,
            servers: snapshot.servers,
            passcode,
        };
        Ok((support, statistics))
    }

    // ========== Table Collection ==========

    /// Insert a table; fails if the number is already taken.
    pub fn put_table(&mut self, table: Table) -> bool {
        if self.tables.contains_key(&table.number) {
            return false;
        }
        self.tables.insert(table.number, table);
        true
    }

    /// Remove a table, returning it so the caller can settle its server
    /// assignment and order counters. `None` for an unknown number.
    pub fn delete_table(&mut self, number: u32) -> Option<Table> {
        self.tables.remove(&number)
    }

    pub fn get_table(&self, number: u32) -> Option<&Table> {
        self.tables.get(&number)
    }

    pub fn get_table_mut(&mut self, number: u32) -> Option<&mut Table> {
        self.tables.get_mut(&number)
    }

    /// All tables in table-number order.
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.tables.values()
    }

    // ========== Server Collection ==========

    /// Insert a server; fails if the id is already taken.
    pub fn put_server(&mut self, server: Server) -> bool {
        if self.servers.contains_key(&server.id) {
            return false;
        }
        self.servers.insert(server.id.clone(), server);
        true
    }

    /// Remove a server. Refused while any table still references the id, so
    /// table→server references can never dangle.
    pub fn delete_server(&mut self, id: &str) -> bool {
        if !self.servers.contains_key(id) {
            return false;
        }
        if self
            .tables
            .values()
            .any(|table| table.server_id.as_deref() == Some(id))
        {
            tracing::warn!(server_id = %id, "refusing to delete server still assigned to tables");
            return false;
        }
        self.servers.remove(id).is_some()
    }

    pub fn get_server(&self, id: &str) -> Option<&Server> {
        self.servers.get(id)
    }

    pub fn get_server_mut(&mut self, id: &str) -> Option<&mut Server> {
        self.servers.get_mut(id)
    }

    /// All servers in id order.
    pub fn servers(&self) -> impl Iterator<Item = &Server> {
        self.servers.values()
    }

    // ========== Passcode ==========

    /// Compare the offered passcode against the stored one. Returns only a
    /// boolean; whether a passcode is set is never revealed.
    pub fn authenticate_passcode(&self, code: &str) -> bool {
        Sha256::digest(code.as_bytes()) == Sha256::digest(self.passcode.as_bytes())
    }

    // ========== Persistence ==========

    /// Flush the full snapshot (collections + ledger + passcode) to the
    /// store as one atomic write.
    pub fn dump_to_file(&self, statistics: &RestaurantStatistics) -> StorageResult<()> {
        self.store
            .dump(&self.tables, &self.servers, &self.passcode, statistics)?;
        tracing::debug!(
            tables = self.tables.len(),
            servers = self.servers.len(),
            "floor snapshot flushed"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::menu::NO_SELECTION;
    use shared::models::Order;

    fn open_support() -> (StorageSupport, RestaurantStatistics) {
        StorageSupport::open_in_memory("4242").unwrap()
    }

    #[test]
    fn put_table_rejects_duplicate_number() {
        let (mut support, _) = open_support();
        assert!(support.put_table(Table::new(1)));
        assert!(!support.put_table(Table::new(1)));
        assert!(support.get_table(1).is_some());
        assert!(support.get_table(2).is_none());
    }

    #[test]
    fn delete_table_returns_the_removed_entity() {
        let (mut support, _) = open_support();
        support.put_table(Table::new(1));
        let removed = support.delete_table(1).unwrap();
        assert_eq!(removed.number, 1);
        assert!(support.delete_table(1).is_none());
    }

    #[test]
    fn delete_server_refused_while_referenced() {
        let (mut support, _) = open_support();
        assert!(support.put_server(Server::new("alice")));
        let mut table = Table::new(1);
        table.set_to_in_use("alice");
        support.put_table(table);

        assert!(!support.delete_server("alice"));

        support.delete_table(1);
        assert!(support.delete_server("alice"));
        assert!(!support.delete_server("alice"));
    }

    #[test]
    fn passcode_check_is_boolean_only() {
        let (support, _) = open_support();
        assert!(support.authenticate_passcode("4242"));
        assert!(!support.authenticate_passcode("0000"));
        assert!(!support.authenticate_passcode(""));
    }

    #[test]
    fn dump_then_load_round_trips_the_snapshot() {
        let (mut support, mut stats) = open_support();
        assert!(support.put_server(Server::new("alice")));
        let mut table = Table::new(1);
        table.set_to_in_use("alice");
        table.put_order(Order::new(1, 0, NO_SELECTION, 2, 1, "no salt"));
        table.add_check("Order #1");
        support.put_table(table);
        support.get_server_mut("alice").unwrap().increment_table_count();
        stats.update_order_id(2);
        stats.update_table_count(1);
        stats.update_drink_count(0, true);

        support.dump_to_file(&stats).unwrap();

        let (reloaded, reloaded_stats) =
            StorageSupport::from_store(support.store.clone(), "ignored").unwrap();
        assert_eq!(reloaded_stats, stats);
        assert_eq!(reloaded.tables, support.tables);
        assert_eq!(reloaded.servers, support.servers);
        // Stored passcode wins over the bootstrap value.
        assert!(reloaded.authenticate_passcode("4242"));
    }

    #[test]
    fn first_run_uses_bootstrap_passcode_and_defaults() {
        let (support, stats) = open_support();
        assert_eq!(stats, RestaurantStatistics::default());
        assert_eq!(support.tables().count(), 0);
        assert_eq!(support.servers().count(), 0);
        assert!(support.authenticate_passcode("4242"));
    }
}
