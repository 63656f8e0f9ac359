//! Product/vendor link command handlers

use anyhow::Result;
use fleetguard_core::Store;

use crate::output::Output;

/// Link a product to a vendor, enabling device registration for the pair
pub fn link(store: &Store, product_id: String, vendor_id: String, output: &Output) -> Result<()> {
    store.catalog().link(&product_id, &vendor_id)?;
    output.success(&format!("Linked product {} to vendor {}", product_id, vendor_id));
    Ok(())
}

/// List all linked pairs
pub fn list(store: &Store, output: &Output) -> Result<()> {
    let links = store.catalog().list_all()?;
    let entries: Vec<(String, String)> = links
        .into_iter()
        .map(|l| (l.product_id, l.vendor_id))
        .collect();
    output.print_catalog_entries("link", &entries);
    Ok(())
}
