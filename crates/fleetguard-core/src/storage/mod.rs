//! Storage layer
//!
//! SQLite-backed persistence for the fleet registry.
//!
//! ## Architecture
//!
//! - `schema`: table definitions and idempotent initialization
//! - `error`: the typed failure taxonomy every operation maps into
//! - one repository module per entity family, each a thin view over the
//!   connection owned by [`crate::store::Store`]
//!
//! Primary-key and foreign-key checks are delegated to SQLite; the
//! repositories translate constraint outcomes into typed errors rather
//! than pre-validating with their own reads.

pub mod catalog;
pub mod device;
pub mod edge_node;
pub mod error;
pub mod log_event;
pub mod schema;
pub mod virus_hash;

pub use catalog::{ProductRepo, ProductVendorRepo, VendorRepo};
pub use device::DeviceRepo;
pub use edge_node::EdgeNodeRepo;
pub use error::{StoreError, StoreResult};
pub use log_event::LogEventRepo;
pub use schema::{init_schema, needs_init};
pub use virus_hash::VirusHashRepo;
