//! SQLite schema for the fleet store
//!
//! Six tables created in dependency order: `edge_node`, `vendor`,
//! `product`, and `virus_hash` stand alone; `product_vendor` references
//! vendor and product; `device` references a linked pair; `log`
//! references edge_node and device.
//!
//! Initialization is idempotent (`CREATE TABLE IF NOT EXISTS`). An
//! existing store is used as-is; table definitions are not re-validated.

use rusqlite::{Connection, Result};

/// Initialize the database schema
pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        -- Gateway nodes; heartbeat fields are updated by an external monitor
        CREATE TABLE IF NOT EXISTS edge_node (
            mac_address    TEXT PRIMARY KEY CHECK (length(mac_address) <= 8),
            is_online      INTEGER NOT NULL CHECK (is_online IN (0, 1)),
            last_heartbeat TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS vendor (
            vendor_id   TEXT PRIMARY KEY CHECK (length(vendor_id) <= 4),
            vendor_name TEXT NOT NULL CHECK (length(vendor_name) <= 30)
        );

        CREATE TABLE IF NOT EXISTS product (
            product_id   TEXT PRIMARY KEY CHECK (length(product_id) <= 4),
            product_name TEXT NOT NULL CHECK (length(product_name) <= 30)
        );

        -- Content-fingerprint denylist
        CREATE TABLE IF NOT EXISTS virus_hash (
            hash_key    TEXT PRIMARY KEY CHECK (length(hash_key) <= 32),
            description TEXT NOT NULL CHECK (length(description) <= 100)
        );

        -- Many-to-many gate: a device may only reference a linked pair
        CREATE TABLE IF NOT EXISTS product_vendor (
            product_id TEXT NOT NULL,
            vendor_id  TEXT NOT NULL,
            PRIMARY KEY (product_id, vendor_id),
            FOREIGN KEY (product_id) REFERENCES product(product_id),
            FOREIGN KEY (vendor_id) REFERENCES vendor(vendor_id)
        );

        -- status is a one-character code: U=unknown, W=whitelisted, B=blacklisted
        CREATE TABLE IF NOT EXISTS device (
            serial_number TEXT PRIMARY KEY CHECK (length(serial_number) <= 8),
            product_id    TEXT NOT NULL,
            vendor_id     TEXT NOT NULL,
            status        TEXT NOT NULL CHECK (status IN ('U', 'W', 'B')),
            FOREIGN KEY (product_id, vendor_id)
                REFERENCES product_vendor(product_id, vendor_id)
        );

        -- Append-only audit log; the composite key rejects same-instant
        -- duplicates for the same node/device pair
        CREATE TABLE IF NOT EXISTS log (
            edge_node_mac_address TEXT NOT NULL,
            device_serial_number  TEXT NOT NULL,
            log_time              TEXT NOT NULL,
            description           TEXT NOT NULL CHECK (length(description) <= 100),
            PRIMARY KEY (edge_node_mac_address, device_serial_number, log_time),
            FOREIGN KEY (edge_node_mac_address) REFERENCES edge_node(mac_address),
            FOREIGN KEY (device_serial_number) REFERENCES device(serial_number)
        );

        -- Online-node enumeration
        CREATE INDEX IF NOT EXISTS idx_edge_node_is_online ON edge_node(is_online);

        -- Log queries sorted by time
        CREATE INDEX IF NOT EXISTS idx_log_log_time ON log(log_time);
        "#,
    )
}

/// Check if the schema needs initialization
pub fn needs_init(conn: &Connection) -> bool {
    // edge_node is created first; its absence means a fresh store
    let table_exists: bool = conn
        .prepare("SELECT 1 FROM sqlite_master WHERE type='table' AND name='edge_node'")
        .and_then(|mut stmt| stmt.exists([]))
        .unwrap_or(false);

    !table_exists
}
