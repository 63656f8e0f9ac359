//! Fleetguard Core Library
//!
//! Persistence layer for a fleet-monitoring application. Tracks edge
//! nodes (gateways), the devices they see, vendor/product identity of
//! those devices, known-malicious-file fingerprints, and an audit log
//! of device events. Devices carry a tri-state trust classification
//! (unknown / whitelisted / blacklisted).
//!
//! # Quick Start
//!
//! ```text
//! let store = Store::open("fleet.db")?;
//!
//! // Register a gateway
//! let node = EdgeNode::new("A1B2C3D4", true, "2021-08-27 09:19:00.000");
//! store.edge_nodes().register(&node)?;
//!
//! // Classify a device
//! store.devices().set_whitelisted("SN-1000")?;
//! ```
//!
//! # Modules
//!
//! - `store`: the facade owning the connection (main entry point)
//! - `models`: plain value types for each entity family
//! - `storage`: schema, error taxonomy, and per-entity repositories

pub mod models;
pub mod storage;
pub mod store;

pub use models::{
    Device, DeviceStatus, EdgeNode, LogEvent, Product, ProductVendorLink, Vendor, VirusHash,
};
pub use storage::{StoreError, StoreResult};
pub use store::{Store, StoreStats};
