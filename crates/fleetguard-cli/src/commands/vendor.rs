//! Vendor command handlers

use anyhow::Result;
use fleetguard_core::{Store, Vendor};

use crate::output::Output;

/// Register a new vendor
pub fn register(store: &Store, id: String, name: String, output: &Output) -> Result<()> {
    let vendor = Vendor::new(id, name);
    store.vendors().register(&vendor)?;
    output.success(&format!(
        "Registered vendor {} ({})",
        vendor.vendor_id, vendor.vendor_name
    ));
    Ok(())
}

/// List all vendors
pub fn list(store: &Store, output: &Output) -> Result<()> {
    let entries: Vec<(String, String)> = store
        .vendors()
        .list_all()?
        .into_iter()
        .map(|v| (v.vendor_id, v.vendor_name))
        .collect();
    output.print_catalog_entries("vendor", &entries);
    Ok(())
}

/// Show a single vendor
pub fn show(store: &Store, id: String, output: &Output) -> Result<()> {
    let vendor = store.vendors().get(&id)?;
    output.print_catalog_entries(
        "vendor",
        &[(vendor.vendor_id, vendor.vendor_name)],
    );
    Ok(())
}
