//! Store facade
//!
//! The single entry point a caller obtains. The `Store` owns the SQLite
//! connection for one storage location and hands out repository views
//! for each entity family.
//!
//! ## Usage
//!
//! ```ignore
//! let store = Store::open("fleet.db")?;
//!
//! store.vendors().register(&Vendor::new("ACME", "Acme Corp"))?;
//! store.products().register(&Product::new("GW01", "Gateway Mk I"))?;
//! store.catalog().link("GW01", "ACME")?;
//! store.devices().register("A1B2C3", "GW01", "ACME")?;
//! ```
//!
//! One facade instance assumes at most one in-flight operation at a
//! time; callers who share a store across threads serialize access
//! themselves. Separate `Store` instances over the same file are
//! independent connections.

use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::Connection;
use tracing::{debug, info};

use crate::storage::error::{StoreError, StoreResult};
use crate::storage::schema::{init_schema, needs_init};
use crate::storage::{
    DeviceRepo, EdgeNodeRepo, LogEventRepo, ProductRepo, ProductVendorRepo, VendorRepo,
    VirusHashRepo,
};

/// Per-entity record counts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreStats {
    pub edge_nodes: i64,
    pub vendors: i64,
    pub products: i64,
    pub devices: i64,
    pub virus_hashes: i64,
    pub log_events: i64,
}

/// Facade over one fleet store
#[derive(Debug)]
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open the store at `path`, creating it with the full schema if no
    /// store exists there
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| StoreError::CreateDirectory {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!(path = %path.display(), "opening fleet store");
        let conn = Connection::open(path).map_err(|source| StoreError::Unavailable {
            path: path.to_path_buf(),
            source,
        })?;

        Self::finish_open(conn, path.to_path_buf())
    }

    /// Open an in-memory store (for testing)
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory().map_err(|source| StoreError::Unavailable {
            path: PathBuf::from(":memory:"),
            source,
        })?;
        Self::finish_open(conn, PathBuf::from(":memory:"))
    }

    fn finish_open(conn: Connection, path: PathBuf) -> StoreResult<Self> {
        // Referential integrity is enforced by the engine; without this
        // pragma SQLite silently skips every FOREIGN KEY clause.
        conn.execute_batch("PRAGMA foreign_keys = ON;")
            .map_err(|source| StoreError::Unavailable {
                path: path.clone(),
                source,
            })?;

        if needs_init(&conn) {
            info!(path = %path.display(), "initializing fleet store schema");
            init_schema(&conn).map_err(|source| StoreError::Unavailable {
                path: path.clone(),
                source,
            })?;
        }

        Ok(Self { conn })
    }

    /// Edge node repository
    pub fn edge_nodes(&self) -> EdgeNodeRepo<'_> {
        EdgeNodeRepo::new(&self.conn)
    }

    /// Vendor repository
    pub fn vendors(&self) -> VendorRepo<'_> {
        VendorRepo::new(&self.conn)
    }

    /// Product repository
    pub fn products(&self) -> ProductRepo<'_> {
        ProductRepo::new(&self.conn)
    }

    /// Product/vendor link repository
    pub fn catalog(&self) -> ProductVendorRepo<'_> {
        ProductVendorRepo::new(&self.conn)
    }

    /// Device repository and trust state machine
    pub fn devices(&self) -> DeviceRepo<'_> {
        DeviceRepo::new(&self.conn)
    }

    /// Virus hash repository
    pub fn virus_hashes(&self) -> VirusHashRepo<'_> {
        VirusHashRepo::new(&self.conn)
    }

    /// Log event repository
    pub fn log_events(&self) -> LogEventRepo<'_> {
        LogEventRepo::new(&self.conn)
    }

    /// Record counts for every entity family
    pub fn stats(&self) -> StoreResult<StoreStats> {
        Ok(StoreStats {
            edge_nodes: self.edge_nodes().count()?,
            vendors: self.vendors().count()?,
            products: self.products().count()?,
            devices: self.devices().count()?,
            virus_hashes: self.virus_hashes().count()?,
            log_events: self.log_events().count()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EdgeNode, Product, Vendor, VirusHash};
    use tempfile::TempDir;

    #[test]
    fn test_open_creates_store() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("fleet.db");

        let store = Store::open(&db_path).unwrap();
        assert!(db_path.exists());
        assert_eq!(store.stats().unwrap().edge_nodes, 0);
    }

    #[test]
    fn test_open_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("nested").join("dir").join("fleet.db");

        Store::open(&db_path).unwrap();
        assert!(db_path.exists());
    }

    #[test]
    fn test_reopen_is_a_no_op() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("fleet.db");

        {
            let store = Store::open(&db_path).unwrap();
            store
                .edge_nodes()
                .register(&EdgeNode::new("ABCD", true, "t1"))
                .unwrap();
        }

        // Existing data survives a second open; schema is not recreated
        let store = Store::open(&db_path).unwrap();
        let node = store.edge_nodes().get("ABCD").unwrap();
        assert!(node.is_online);
    }

    #[test]
    fn test_open_unusable_location_fails() {
        let temp_dir = TempDir::new().unwrap();
        // A directory cannot be opened as a database file
        let err = Store::open(temp_dir.path()).unwrap_err();
        assert!(matches!(err, StoreError::Unavailable { .. }));
    }

    #[test]
    fn test_multiple_stores_are_independent() {
        let store_a = Store::open_in_memory().unwrap();
        let store_b = Store::open_in_memory().unwrap();

        store_a
            .vendors()
            .register(&Vendor::new("DCBA", "Sabaton"))
            .unwrap();

        assert_eq!(store_a.vendors().count().unwrap(), 1);
        assert_eq!(store_b.vendors().count().unwrap(), 0);
    }

    #[test]
    fn test_online_status_scenario() {
        let store = Store::open_in_memory().unwrap();
        let nodes = store.edge_nodes();

        nodes.register(&EdgeNode::new("ABCD", true, "t1")).unwrap();
        nodes.register(&EdgeNode::new("EFGH", false, "t2")).unwrap();

        assert_eq!(nodes.list_online().unwrap(), vec!["ABCD"]);

        nodes.set_online_status("ABCD", false, "t3").unwrap();
        assert!(nodes.list_online().unwrap().is_empty());
    }

    #[test]
    fn test_device_registration_through_facade() {
        let store = Store::open_in_memory().unwrap();

        store
            .products()
            .register(&Product::new("QWER", "Make"))
            .unwrap();
        store
            .vendors()
            .register(&Vendor::new("DCBA", "Sabaton"))
            .unwrap();

        // Registration gated on the link
        let err = store.devices().register("1000", "QWER", "DCBA").unwrap_err();
        assert!(matches!(err, StoreError::ForeignKeyViolation { .. }));

        store.catalog().link("QWER", "DCBA").unwrap();
        store.devices().register("1000", "QWER", "DCBA").unwrap();
        assert!(!store.devices().is_blacklisted("1000").unwrap());
    }

    #[test]
    fn test_stats() {
        let store = Store::open_in_memory().unwrap();

        store
            .edge_nodes()
            .register(&EdgeNode::new("ABCD", true, "t1"))
            .unwrap();
        store
            .virus_hashes()
            .register(&VirusHash::new("UVUUNNU", "Totally"))
            .unwrap();
        store
            .virus_hashes()
            .register(&VirusHash::new("YUCWZXB", "not a"))
            .unwrap();

        let stats = store.stats().unwrap();
        assert_eq!(stats.edge_nodes, 1);
        assert_eq!(stats.virus_hashes, 2);
        assert_eq!(stats.devices, 0);
        assert_eq!(stats.log_events, 0);
    }
}
