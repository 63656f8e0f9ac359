//! Vendor and product catalog
//!
//! Vendors and products carry a symmetric register/get/list contract.
//! `ProductVendorRepo` manages the many-to-many link between them; a
//! device can only be registered for a pair that has been linked here.

use rusqlite::{params, Connection};

use crate::models::{Product, ProductVendorLink, Vendor};
use crate::storage::error::{StoreError, StoreResult};

/// Typed access to the `vendor` table
pub struct VendorRepo<'conn> {
    conn: &'conn Connection,
}

impl<'conn> VendorRepo<'conn> {
    pub(crate) fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Register a new vendor; fails with `DuplicateKey` on collision
    pub fn register(&self, vendor: &Vendor) -> StoreResult<()> {
        self.conn
            .execute(
                "INSERT INTO vendor (vendor_id, vendor_name) VALUES (?1, ?2)",
                params![vendor.vendor_id, vendor.vendor_name],
            )
            .map_err(|e| StoreError::classify_insert(e, "vendor", &vendor.vendor_id))?;
        Ok(())
    }

    /// Look up a vendor by ID
    pub fn get(&self, vendor_id: &str) -> StoreResult<Vendor> {
        self.conn
            .query_row(
                "SELECT vendor_id, vendor_name FROM vendor WHERE vendor_id = ?1",
                params![vendor_id],
                |row| {
                    Ok(Vendor {
                        vendor_id: row.get(0)?,
                        vendor_name: row.get(1)?,
                    })
                },
            )
            .map_err(|e| StoreError::classify_lookup(e, "vendor", vendor_id))
    }

    /// All vendor IDs, in no guaranteed order
    pub fn list_keys(&self) -> StoreResult<Vec<String>> {
        let mut stmt = self.conn.prepare("SELECT vendor_id FROM vendor")?;
        let keys = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(keys)
    }

    /// All vendors
    pub fn list_all(&self) -> StoreResult<Vec<Vendor>> {
        let mut stmt = self
            .conn
            .prepare("SELECT vendor_id, vendor_name FROM vendor")?;
        let vendors = stmt
            .query_map([], |row| {
                Ok(Vendor {
                    vendor_id: row.get(0)?,
                    vendor_name: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(vendors)
    }

    /// Number of registered vendors
    pub fn count(&self) -> StoreResult<i64> {
        self.conn
            .query_row("SELECT COUNT(*) FROM vendor", [], |row| row.get(0))
            .map_err(Into::into)
    }
}

/// Typed access to the `product` table
pub struct ProductRepo<'conn> {
    conn: &'conn Connection,
}

impl<'conn> ProductRepo<'conn> {
    pub(crate) fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Register a new product; fails with `DuplicateKey` on collision
    pub fn register(&self, product: &Product) -> StoreResult<()> {
        self.conn
            .execute(
                "INSERT INTO product (product_id, product_name) VALUES (?1, ?2)",
                params![product.product_id, product.product_name],
            )
            .map_err(|e| StoreError::classify_insert(e, "product", &product.product_id))?;
        Ok(())
    }

    /// Look up a product by ID
    pub fn get(&self, product_id: &str) -> StoreResult<Product> {
        self.conn
            .query_row(
                "SELECT product_id, product_name FROM product WHERE product_id = ?1",
                params![product_id],
                |row| {
                    Ok(Product {
                        product_id: row.get(0)?,
                        product_name: row.get(1)?,
                    })
                },
            )
            .map_err(|e| StoreError::classify_lookup(e, "product", product_id))
    }

    /// All product IDs, in no guaranteed order
    pub fn list_keys(&self) -> StoreResult<Vec<String>> {
        let mut stmt = self.conn.prepare("SELECT product_id FROM product")?;
        let keys = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(keys)
    }

    /// All products
    pub fn list_all(&self) -> StoreResult<Vec<Product>> {
        let mut stmt = self
            .conn
            .prepare("SELECT product_id, product_name FROM product")?;
        let products = stmt
            .query_map([], |row| {
                Ok(Product {
                    product_id: row.get(0)?,
                    product_name: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(products)
    }

    /// Number of registered products
    pub fn count(&self) -> StoreResult<i64> {
        self.conn
            .query_row("SELECT COUNT(*) FROM product", [], |row| row.get(0))
            .map_err(Into::into)
    }
}

/// Typed access to the `product_vendor` link table
pub struct ProductVendorRepo<'conn> {
    conn: &'conn Connection,
}

impl<'conn> ProductVendorRepo<'conn> {
    pub(crate) fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Link a product to a vendor
    ///
    /// Fails with `ForeignKeyViolation` if either side was never
    /// registered, and with `DuplicateKey` if the pair is already linked.
    pub fn link(&self, product_id: &str, vendor_id: &str) -> StoreResult<()> {
        self.conn
            .execute(
                "INSERT INTO product_vendor (product_id, vendor_id) VALUES (?1, ?2)",
                params![product_id, vendor_id],
            )
            .map_err(|e| {
                StoreError::classify_insert(
                    e,
                    "product/vendor link",
                    format!("{}/{}", product_id, vendor_id),
                )
            })?;
        Ok(())
    }

    /// Whether the pair has been linked; false for unknown pairs, never
    /// an error
    pub fn is_linked(&self, product_id: &str, vendor_id: &str) -> StoreResult<bool> {
        let mut stmt = self.conn.prepare(
            "SELECT 1 FROM product_vendor WHERE product_id = ?1 AND vendor_id = ?2",
        )?;
        stmt.exists(params![product_id, vendor_id])
            .map_err(Into::into)
    }

    /// All linked pairs
    pub fn list_all(&self) -> StoreResult<Vec<ProductVendorLink>> {
        let mut stmt = self
            .conn
            .prepare("SELECT product_id, vendor_id FROM product_vendor")?;
        let links = stmt
            .query_map([], |row| {
                Ok(ProductVendorLink {
                    product_id: row.get(0)?,
                    vendor_id: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(links)
    }
}
