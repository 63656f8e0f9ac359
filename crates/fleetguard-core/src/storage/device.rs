//! Device repository and trust state machine
//!
//! Devices start as `Unknown` and move between `Whitelisted` and
//! `Blacklisted` through unconditional last-writer-wins transitions.
//! No transition back to `Unknown` is exposed.
//!
//! The read/write asymmetry is deliberate: the `is_whitelisted` /
//! `is_blacklisted` queries are advisory and return false for a serial
//! that was never registered, while the mutating transitions fail with
//! `NotFound` so a caller never believes a classification succeeded
//! when it touched nothing.

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef};
use rusqlite::{params, Connection, ToSql};

use crate::models::{Device, DeviceStatus};
use crate::storage::error::{StoreError, StoreResult};

const ENTITY: &str = "device";

// Status codes cross the storage boundary here and nowhere else.

impl ToSql for DeviceStatus {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(self.code().into())
    }
}

impl FromSql for DeviceStatus {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let code = value.as_str()?;
        DeviceStatus::from_code(code).ok_or(FromSqlError::InvalidType)
    }
}

/// Typed access to the `device` table
pub struct DeviceRepo<'conn> {
    conn: &'conn Connection,
}

impl<'conn> DeviceRepo<'conn> {
    pub(crate) fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Register a new device with status `Unknown`
    ///
    /// Fails with `ForeignKeyViolation` unless the (product, vendor)
    /// pair has been linked, and with `DuplicateKey` if the serial
    /// number already exists.
    pub fn register(
        &self,
        serial_number: &str,
        product_id: &str,
        vendor_id: &str,
    ) -> StoreResult<()> {
        self.conn
            .execute(
                "INSERT INTO device (serial_number, product_id, vendor_id, status)
                 VALUES (?1, ?2, ?3, ?4)",
                params![serial_number, product_id, vendor_id, DeviceStatus::Unknown],
            )
            .map_err(|e| StoreError::classify_insert(e, ENTITY, serial_number))?;
        Ok(())
    }

    /// Look up a device by serial number
    pub fn get(&self, serial_number: &str) -> StoreResult<Device> {
        self.conn
            .query_row(
                "SELECT serial_number, product_id, vendor_id, status
                 FROM device WHERE serial_number = ?1",
                params![serial_number],
                |row| {
                    Ok(Device {
                        serial_number: row.get(0)?,
                        product_id: row.get(1)?,
                        vendor_id: row.get(2)?,
                        status: row.get(3)?,
                    })
                },
            )
            .map_err(|e| StoreError::classify_lookup(e, ENTITY, serial_number))
    }

    /// All serial numbers, in no guaranteed order
    pub fn list_keys(&self) -> StoreResult<Vec<String>> {
        let mut stmt = self.conn.prepare("SELECT serial_number FROM device")?;
        let keys = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(keys)
    }

    /// All registered devices
    pub fn list_all(&self) -> StoreResult<Vec<Device>> {
        let mut stmt = self
            .conn
            .prepare("SELECT serial_number, product_id, vendor_id, status FROM device")?;
        let devices = stmt
            .query_map([], |row| {
                Ok(Device {
                    serial_number: row.get(0)?,
                    product_id: row.get(1)?,
                    vendor_id: row.get(2)?,
                    status: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(devices)
    }

    /// Mark a device as trusted, overwriting any prior classification
    pub fn set_whitelisted(&self, serial_number: &str) -> StoreResult<()> {
        self.set_status(serial_number, DeviceStatus::Whitelisted)
    }

    /// Mark a device as distrusted, overwriting any prior classification
    pub fn set_blacklisted(&self, serial_number: &str) -> StoreResult<()> {
        self.set_status(serial_number, DeviceStatus::Blacklisted)
    }

    /// Whether the device is whitelisted; false for unknown serials
    pub fn is_whitelisted(&self, serial_number: &str) -> StoreResult<bool> {
        self.has_status(serial_number, DeviceStatus::Whitelisted)
    }

    /// Whether the device is blacklisted; false for unknown serials
    pub fn is_blacklisted(&self, serial_number: &str) -> StoreResult<bool> {
        self.has_status(serial_number, DeviceStatus::Blacklisted)
    }

    /// Number of registered devices
    pub fn count(&self) -> StoreResult<i64> {
        self.conn
            .query_row("SELECT COUNT(*) FROM device", [], |row| row.get(0))
            .map_err(Into::into)
    }

    fn set_status(&self, serial_number: &str, status: DeviceStatus) -> StoreResult<()> {
        let affected = self.conn.execute(
            "UPDATE device SET status = ?1 WHERE serial_number = ?2",
            params![status, serial_number],
        )?;

        if affected == 0 {
            return Err(StoreError::not_found(ENTITY, serial_number));
        }
        Ok(())
    }

    fn has_status(&self, serial_number: &str, status: DeviceStatus) -> StoreResult<bool> {
        let mut stmt = self
            .conn
            .prepare("SELECT 1 FROM device WHERE serial_number = ?1 AND status = ?2")?;
        stmt.exists(params![serial_number, status])
            .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Product, Vendor};
    use crate::storage::catalog::{ProductRepo, ProductVendorRepo, VendorRepo};
    use crate::storage::schema::init_schema;

    /// Connection with one linked (QWER, DCBA) pair ready for devices
    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("PRAGMA foreign_keys = ON;").unwrap();
        init_schema(&conn).unwrap();

        ProductRepo::new(&conn)
            .register(&Product::new("QWER", "Make"))
            .unwrap();
        VendorRepo::new(&conn)
            .register(&Vendor::new("DCBA", "Sabaton"))
            .unwrap();
        ProductVendorRepo::new(&conn).link("QWER", "DCBA").unwrap();
        conn
    }

    #[test]
    fn test_register_defaults_to_unknown() {
        let conn = test_conn();
        let repo = DeviceRepo::new(&conn);

        repo.register("1000", "QWER", "DCBA").unwrap();

        let device = repo.get("1000").unwrap();
        assert_eq!(device.status, DeviceStatus::Unknown);
        assert_eq!(device.product_id, "QWER");
        assert_eq!(device.vendor_id, "DCBA");
        assert!(!repo.is_whitelisted("1000").unwrap());
        assert!(!repo.is_blacklisted("1000").unwrap());
    }

    #[test]
    fn test_register_requires_linked_pair() {
        let conn = test_conn();
        let repo = DeviceRepo::new(&conn);

        // Both IDs exist individually but were never linked as a pair
        ProductRepo::new(&conn)
            .register(&Product::new("TYUI", "Pepsi Twist"))
            .unwrap();
        let err = repo.register("1000", "TYUI", "DCBA").unwrap_err();
        assert!(matches!(err, StoreError::ForeignKeyViolation { .. }));
    }

    #[test]
    fn test_register_duplicate_serial() {
        let conn = test_conn();
        let repo = DeviceRepo::new(&conn);

        repo.register("1000", "QWER", "DCBA").unwrap();
        let err = repo.register("1000", "QWER", "DCBA").unwrap_err();
        assert!(matches!(err, StoreError::DuplicateKey { .. }));
    }

    #[test]
    fn test_status_transitions_last_writer_wins() {
        let conn = test_conn();
        let repo = DeviceRepo::new(&conn);
        repo.register("1000", "QWER", "DCBA").unwrap();

        repo.set_whitelisted("1000").unwrap();
        assert!(repo.is_whitelisted("1000").unwrap());
        assert!(!repo.is_blacklisted("1000").unwrap());

        repo.set_blacklisted("1000").unwrap();
        assert!(repo.is_blacklisted("1000").unwrap());
        assert!(!repo.is_whitelisted("1000").unwrap());

        // Blacklist can be overturned as well
        repo.set_whitelisted("1000").unwrap();
        assert_eq!(repo.get("1000").unwrap().status, DeviceStatus::Whitelisted);
    }

    #[test]
    fn test_transitions_are_existence_strict() {
        let conn = test_conn();
        let repo = DeviceRepo::new(&conn);

        let err = repo.set_whitelisted("1234").unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
        let err = repo.set_blacklisted("1234").unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[test]
    fn test_queries_are_existence_tolerant() {
        let conn = test_conn();
        let repo = DeviceRepo::new(&conn);

        assert!(!repo.is_whitelisted("1234").unwrap());
        assert!(!repo.is_blacklisted("1234").unwrap());
    }

    #[test]
    fn test_enumeration() {
        let conn = test_conn();
        let repo = DeviceRepo::new(&conn);

        repo.register("1000", "QWER", "DCBA").unwrap();
        repo.register("1001", "QWER", "DCBA").unwrap();
        repo.register("1002", "QWER", "DCBA").unwrap();

        let mut keys = repo.list_keys().unwrap();
        keys.sort();
        assert_eq!(keys, vec!["1000", "1001", "1002"]);
        assert_eq!(repo.list_all().unwrap().len(), 3);
        assert_eq!(repo.count().unwrap(), 3);
    }
}
