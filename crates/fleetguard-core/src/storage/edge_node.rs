//! Edge node repository
//!
//! Gateway nodes are registered once and then mutated only through
//! `set_online_status`; the MAC address key is immutable.

use rusqlite::{params, Connection};

use crate::models::EdgeNode;
use crate::storage::error::{StoreError, StoreResult};

const ENTITY: &str = "edge node";

/// Typed access to the `edge_node` table
pub struct EdgeNodeRepo<'conn> {
    conn: &'conn Connection,
}

impl<'conn> EdgeNodeRepo<'conn> {
    pub(crate) fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Register a new edge node
    ///
    /// Fails with `DuplicateKey` if the MAC address is already present.
    pub fn register(&self, node: &EdgeNode) -> StoreResult<()> {
        self.conn
            .execute(
                "INSERT INTO edge_node (mac_address, is_online, last_heartbeat)
                 VALUES (?1, ?2, ?3)",
                params![node.mac_address, node.is_online, node.last_heartbeat],
            )
            .map_err(|e| StoreError::classify_insert(e, ENTITY, &node.mac_address))?;
        Ok(())
    }

    /// Update the online flag and heartbeat of an existing node
    ///
    /// Fails with `NotFound` when no row was affected; a driver-level
    /// success with zero matched rows must not look like a successful
    /// update to the caller.
    pub fn set_online_status(
        &self,
        mac_address: &str,
        is_online: bool,
        last_heartbeat: &str,
    ) -> StoreResult<()> {
        let affected = self.conn.execute(
            "UPDATE edge_node SET is_online = ?1, last_heartbeat = ?2 WHERE mac_address = ?3",
            params![is_online, last_heartbeat, mac_address],
        )?;

        if affected == 0 {
            return Err(StoreError::not_found(ENTITY, mac_address));
        }
        Ok(())
    }

    /// Look up a node by MAC address
    pub fn get(&self, mac_address: &str) -> StoreResult<EdgeNode> {
        self.conn
            .query_row(
                "SELECT mac_address, is_online, last_heartbeat
                 FROM edge_node WHERE mac_address = ?1",
                params![mac_address],
                |row| {
                    Ok(EdgeNode {
                        mac_address: row.get(0)?,
                        is_online: row.get(1)?,
                        last_heartbeat: row.get(2)?,
                    })
                },
            )
            .map_err(|e| StoreError::classify_lookup(e, ENTITY, mac_address))
    }

    /// All registered MAC addresses, in no guaranteed order
    pub fn list_keys(&self) -> StoreResult<Vec<String>> {
        let mut stmt = self.conn.prepare("SELECT mac_address FROM edge_node")?;
        let keys = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(keys)
    }

    /// All registered nodes
    pub fn list_all(&self) -> StoreResult<Vec<EdgeNode>> {
        let mut stmt = self
            .conn
            .prepare("SELECT mac_address, is_online, last_heartbeat FROM edge_node")?;
        let nodes = stmt
            .query_map([], |row| {
                Ok(EdgeNode {
                    mac_address: row.get(0)?,
                    is_online: row.get(1)?,
                    last_heartbeat: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(nodes)
    }

    /// MAC addresses of all nodes currently marked online
    pub fn list_online(&self) -> StoreResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT mac_address FROM edge_node WHERE is_online = 1")?;
        let keys = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(keys)
    }

    /// Number of registered nodes
    pub fn count(&self) -> StoreResult<i64> {
        self.conn
            .query_row("SELECT COUNT(*) FROM edge_node", [], |row| row.get(0))
            .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::schema::init_schema;

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("PRAGMA foreign_keys = ON;").unwrap();
        init_schema(&conn).unwrap();
        conn
    }

    #[test]
    fn test_register_and_get() {
        let conn = test_conn();
        let repo = EdgeNodeRepo::new(&conn);

        let node = EdgeNode::new("IJKL", true, "2016-04-16 07:36:03.987");
        repo.register(&node).unwrap();

        let found = repo.get("IJKL").unwrap();
        assert_eq!(found, node);
    }

    #[test]
    fn test_get_missing_is_not_found() {
        let conn = test_conn();
        let repo = EdgeNodeRepo::new(&conn);

        let err = repo.get("ZZZZ").unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[test]
    fn test_duplicate_register_rejected() {
        let conn = test_conn();
        let repo = EdgeNodeRepo::new(&conn);

        repo.register(&EdgeNode::new("ABCD", true, "t1")).unwrap();
        let err = repo
            .register(&EdgeNode::new("ABCD", false, "t2"))
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateKey { .. }));

        // First registration untouched
        let found = repo.get("ABCD").unwrap();
        assert!(found.is_online);
        assert_eq!(found.last_heartbeat, "t1");
    }

    #[test]
    fn test_set_online_status() {
        let conn = test_conn();
        let repo = EdgeNodeRepo::new(&conn);

        repo.register(&EdgeNode::new("ABCD", true, "t1")).unwrap();
        repo.set_online_status("ABCD", false, "t3").unwrap();

        let found = repo.get("ABCD").unwrap();
        assert!(!found.is_online);
        assert_eq!(found.last_heartbeat, "t3");
    }

    #[test]
    fn test_set_online_status_missing_node() {
        let conn = test_conn();
        let repo = EdgeNodeRepo::new(&conn);

        let err = repo.set_online_status("ZZZZ", true, "t1").unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[test]
    fn test_list_keys_and_all() {
        let conn = test_conn();
        let repo = EdgeNodeRepo::new(&conn);

        repo.register(&EdgeNode::new("ABCD", true, "t1")).unwrap();
        repo.register(&EdgeNode::new("EFGH", false, "t2")).unwrap();
        repo.register(&EdgeNode::new("IJKL", true, "t3")).unwrap();

        let mut keys = repo.list_keys().unwrap();
        keys.sort();
        assert_eq!(keys, vec!["ABCD", "EFGH", "IJKL"]);

        let nodes = repo.list_all().unwrap();
        assert_eq!(nodes.len(), 3);
        assert_eq!(repo.count().unwrap(), 3);
    }

    #[test]
    fn test_list_online_tracks_status_updates() {
        let conn = test_conn();
        let repo = EdgeNodeRepo::new(&conn);

        repo.register(&EdgeNode::new("ABCD", true, "t1")).unwrap();
        repo.register(&EdgeNode::new("EFGH", false, "t2")).unwrap();

        assert_eq!(repo.list_online().unwrap(), vec!["ABCD"]);

        repo.set_online_status("ABCD", false, "t3").unwrap();
        assert!(repo.list_online().unwrap().is_empty());
    }
}
