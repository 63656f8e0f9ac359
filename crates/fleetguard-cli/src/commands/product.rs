//! Product command handlers

use anyhow::Result;
use fleetguard_core::{Product, Store};

use crate::output::Output;

/// Register a new product
pub fn register(store: &Store, id: String, name: String, output: &Output) -> Result<()> {
    let product = Product::new(id, name);
    store.products().register(&product)?;
    output.success(&format!(
        "Registered product {} ({})",
        product.product_id, product.product_name
    ));
    Ok(())
}

/// List all products
pub fn list(store: &Store, output: &Output) -> Result<()> {
    let entries: Vec<(String, String)> = store
        .products()
        .list_all()?
        .into_iter()
        .map(|p| (p.product_id, p.product_name))
        .collect();
    output.print_catalog_entries("product", &entries);
    Ok(())
}

/// Show a single product
pub fn show(store: &Store, id: String, output: &Output) -> Result<()> {
    let product = store.products().get(&id)?;
    output.print_catalog_entries(
        "product",
        &[(product.product_id, product.product_name)],
    );
    Ok(())
}
