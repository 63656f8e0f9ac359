//! Data models for Fleetguard
//!
//! Plain value types for the six entity families tracked by the store:
//! edge nodes, vendors, products, product/vendor links, devices, virus
//! hashes, and logged device events.
//!
//! Timestamps are opaque strings at this layer. The store never parses or
//! normalizes them; it stores and compares them exactly as given.

use serde::{Deserialize, Serialize};

/// Trust classification of a device.
///
/// Stored on disk as a one-character code (`U`/`W`/`B`); represented
/// in memory as this enum. Conversion happens only at the storage
/// boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceStatus {
    /// Not yet classified. The initial state of every device.
    Unknown,
    /// Explicitly trusted.
    Whitelisted,
    /// Explicitly distrusted.
    Blacklisted,
}

impl DeviceStatus {
    /// One-character storage code for this status
    pub fn code(self) -> &'static str {
        match self {
            DeviceStatus::Unknown => "U",
            DeviceStatus::Whitelisted => "W",
            DeviceStatus::Blacklisted => "B",
        }
    }

    /// Parse a storage code back into a status
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "U" => Some(DeviceStatus::Unknown),
            "W" => Some(DeviceStatus::Whitelisted),
            "B" => Some(DeviceStatus::Blacklisted),
            _ => None,
        }
    }
}

impl std::fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DeviceStatus::Unknown => "unknown",
            DeviceStatus::Whitelisted => "whitelisted",
            DeviceStatus::Blacklisted => "blacklisted",
        };
        write!(f, "{}", name)
    }
}

/// A gateway node that observes devices and reports heartbeats
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EdgeNode {
    /// MAC address, the immutable key (at most 8 characters)
    pub mac_address: String,
    /// Whether the node is currently online
    pub is_online: bool,
    /// Timestamp of the last heartbeat, opaque to the store
    pub last_heartbeat: String,
}

impl EdgeNode {
    /// Create a new edge node record
    pub fn new(
        mac_address: impl Into<String>,
        is_online: bool,
        last_heartbeat: impl Into<String>,
    ) -> Self {
        Self {
            mac_address: mac_address.into(),
            is_online,
            last_heartbeat: last_heartbeat.into(),
        }
    }
}

/// A device vendor
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Vendor {
    /// Vendor ID, the immutable key (at most 4 characters)
    pub vendor_id: String,
    /// Display name (at most 30 characters)
    pub vendor_name: String,
}

impl Vendor {
    /// Create a new vendor record
    pub fn new(vendor_id: impl Into<String>, vendor_name: impl Into<String>) -> Self {
        Self {
            vendor_id: vendor_id.into(),
            vendor_name: vendor_name.into(),
        }
    }
}

/// A product line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Product {
    /// Product ID, the immutable key (at most 4 characters)
    pub product_id: String,
    /// Display name (at most 30 characters)
    pub product_name: String,
}

impl Product {
    /// Create a new product record
    pub fn new(product_id: impl Into<String>, product_name: impl Into<String>) -> Self {
        Self {
            product_id: product_id.into(),
            product_name: product_name.into(),
        }
    }
}

/// A registered product/vendor pairing
///
/// Both sides must already exist. Every device references one of these
/// pairs, so linking is the gate that device registration depends on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductVendorLink {
    pub product_id: String,
    pub vendor_id: String,
}

/// An end device observed by the fleet
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Device {
    /// Serial number, the immutable key (at most 8 characters)
    pub serial_number: String,
    /// Product this device belongs to
    pub product_id: String,
    /// Vendor this device belongs to
    pub vendor_id: String,
    /// Current trust classification
    pub status: DeviceStatus,
}

/// A known-malicious content fingerprint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VirusHash {
    /// Hash key, the immutable key (at most 32 characters)
    pub hash_key: String,
    /// What this fingerprint identifies (at most 100 characters)
    pub description: String,
}

impl VirusHash {
    /// Create a new virus hash record
    pub fn new(hash_key: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            hash_key: hash_key.into(),
            description: description.into(),
        }
    }
}

/// An audit log entry for a device event seen by an edge node
///
/// Keyed by (node, device, time); two events for the same pair at the
/// same instant are rejected as duplicates, never merged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogEvent {
    /// MAC address of the reporting edge node
    pub edge_node_mac_address: String,
    /// Serial number of the device the event concerns
    pub device_serial_number: String,
    /// When the event happened, opaque to the store
    pub log_time: String,
    /// Event description (at most 100 characters)
    pub description: String,
}

impl LogEvent {
    /// Create a new log event record
    pub fn new(
        edge_node_mac_address: impl Into<String>,
        device_serial_number: impl Into<String>,
        log_time: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            edge_node_mac_address: edge_node_mac_address.into(),
            device_serial_number: device_serial_number.into(),
            log_time: log_time.into(),
            description: description.into(),
        }
    }
}
