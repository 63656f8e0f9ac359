//! Log event repository
//!
//! Append-only audit trail of device events. Entries are keyed by
//! (node, device, time), so a second event for the same pair at the
//! same instant is rejected rather than merged. Log times are stored
//! verbatim; enumeration order is unspecified and callers who need
//! chronological output sort by `log_time` themselves.

use rusqlite::{params, Connection};

use crate::models::LogEvent;
use crate::storage::error::{StoreError, StoreResult};

const ENTITY: &str = "log event";

/// Typed access to the `log` table
pub struct LogEventRepo<'conn> {
    conn: &'conn Connection,
}

impl<'conn> LogEventRepo<'conn> {
    pub(crate) fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Append an event to the log
    ///
    /// Fails with `ForeignKeyViolation` if the node or device is not
    /// registered, and with `DuplicateKey` if the exact (node, device,
    /// time) triple already exists.
    pub fn append(&self, event: &LogEvent) -> StoreResult<()> {
        self.conn
            .execute(
                "INSERT INTO log (edge_node_mac_address, device_serial_number, log_time, description)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    event.edge_node_mac_address,
                    event.device_serial_number,
                    event.log_time,
                    event.description,
                ],
            )
            .map_err(|e| StoreError::classify_insert(e, ENTITY, key_of(event)))?;
        Ok(())
    }

    /// Look up a single event by its composite key
    pub fn get(
        &self,
        edge_node_mac_address: &str,
        device_serial_number: &str,
        log_time: &str,
    ) -> StoreResult<LogEvent> {
        self.conn
            .query_row(
                "SELECT edge_node_mac_address, device_serial_number, log_time, description
                 FROM log
                 WHERE edge_node_mac_address = ?1
                   AND device_serial_number = ?2
                   AND log_time = ?3",
                params![edge_node_mac_address, device_serial_number, log_time],
                |row| {
                    Ok(LogEvent {
                        edge_node_mac_address: row.get(0)?,
                        device_serial_number: row.get(1)?,
                        log_time: row.get(2)?,
                        description: row.get(3)?,
                    })
                },
            )
            .map_err(|e| {
                StoreError::classify_lookup(
                    e,
                    ENTITY,
                    format!(
                        "{}/{}@{}",
                        edge_node_mac_address, device_serial_number, log_time
                    ),
                )
            })
    }

    /// All logged events
    pub fn list_all(&self) -> StoreResult<Vec<LogEvent>> {
        let mut stmt = self.conn.prepare(
            "SELECT edge_node_mac_address, device_serial_number, log_time, description FROM log",
        )?;
        let events = stmt
            .query_map([], |row| {
                Ok(LogEvent {
                    edge_node_mac_address: row.get(0)?,
                    device_serial_number: row.get(1)?,
                    log_time: row.get(2)?,
                    description: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(events)
    }

    /// Number of logged events
    pub fn count(&self) -> StoreResult<i64> {
        self.conn
            .query_row("SELECT COUNT(*) FROM log", [], |row| row.get(0))
            .map_err(Into::into)
    }
}

fn key_of(event: &LogEvent) -> String {
    format!(
        "{}/{}@{}",
        event.edge_node_mac_address, event.device_serial_number, event.log_time
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EdgeNode, Product, Vendor};
    use crate::storage::catalog::{ProductRepo, ProductVendorRepo, VendorRepo};
    use crate::storage::device::DeviceRepo;
    use crate::storage::edge_node::EdgeNodeRepo;
    use crate::storage::schema::init_schema;

    /// Connection with node "ABCD" and device "1000" registered
    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("PRAGMA foreign_keys = ON;").unwrap();
        init_schema(&conn).unwrap();

        EdgeNodeRepo::new(&conn)
            .register(&EdgeNode::new("ABCD", true, "t1"))
            .unwrap();
        ProductRepo::new(&conn)
            .register(&Product::new("QWER", "Make"))
            .unwrap();
        VendorRepo::new(&conn)
            .register(&Vendor::new("DCBA", "Sabaton"))
            .unwrap();
        ProductVendorRepo::new(&conn).link("QWER", "DCBA").unwrap();
        DeviceRepo::new(&conn)
            .register("1000", "QWER", "DCBA")
            .unwrap();
        conn
    }

    #[test]
    fn test_append_and_get() {
        let conn = test_conn();
        let repo = LogEventRepo::new(&conn);

        let event = LogEvent::new("ABCD", "1000", "2021-09-09 22:36:00.000", "Number 0");
        repo.append(&event).unwrap();

        let found = repo
            .get("ABCD", "1000", "2021-09-09 22:36:00.000")
            .unwrap();
        assert_eq!(found, event);
    }

    #[test]
    fn test_append_requires_registered_parents() {
        let conn = test_conn();
        let repo = LogEventRepo::new(&conn);

        let err = repo
            .append(&LogEvent::new("ZZZZ", "1000", "t", "unknown node"))
            .unwrap_err();
        assert!(matches!(err, StoreError::ForeignKeyViolation { .. }));

        let err = repo
            .append(&LogEvent::new("ABCD", "9999", "t", "unknown device"))
            .unwrap_err();
        assert!(matches!(err, StoreError::ForeignKeyViolation { .. }));
    }

    #[test]
    fn test_same_instant_duplicate_rejected() {
        let conn = test_conn();
        let repo = LogEventRepo::new(&conn);

        repo.append(&LogEvent::new("ABCD", "1000", "t1", "first"))
            .unwrap();
        let err = repo
            .append(&LogEvent::new("ABCD", "1000", "t1", "second"))
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateKey { .. }));

        // Original description retained
        let found = repo.get("ABCD", "1000", "t1").unwrap();
        assert_eq!(found.description, "first");
    }

    #[test]
    fn test_distinct_times_accepted() {
        let conn = test_conn();
        let repo = LogEventRepo::new(&conn);

        for i in 0..3 {
            repo.append(&LogEvent::new(
                "ABCD",
                "1000",
                format!("2021-09-09 22:36:00.00{}", i),
                format!("Number {}", i),
            ))
            .unwrap();
        }

        assert_eq!(repo.list_all().unwrap().len(), 3);
        assert_eq!(repo.count().unwrap(), 3);
    }

    #[test]
    fn test_get_missing_is_not_found() {
        let conn = test_conn();
        let repo = LogEventRepo::new(&conn);

        let err = repo.get("ABCD", "1000", "never").unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }
}
