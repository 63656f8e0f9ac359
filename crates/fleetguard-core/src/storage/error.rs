//! Storage error handling
//!
//! Typed errors for every store operation. Constraint classification is
//! driven by SQLite extended result codes: the engine's primary-key and
//! foreign-key checks are authoritative, so the store never pre-validates
//! uniqueness or parent existence with its own reads.

use std::io;
use std::path::PathBuf;

use rusqlite::ffi;
use thiserror::Error;

/// Errors that can occur during store operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store could not be opened or created. Fatal to the caller.
    #[error("Store at '{path}' is unavailable: {source}")]
    Unavailable {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Failed to create the directory that should hold the store
    #[error("Failed to create data directory '{path}': {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An insert violated a primary-key or uniqueness constraint
    #[error("{entity} '{key}' already exists")]
    DuplicateKey { entity: &'static str, key: String },

    /// An insert referenced a parent record that does not exist
    #[error("{entity} '{key}' references a missing parent record")]
    ForeignKeyViolation { entity: &'static str, key: String },

    /// A lookup or mutation matched no row
    #[error("{entity} '{key}' not found")]
    NotFound { entity: &'static str, key: String },

    /// Any other failure surfaced by the storage engine
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}

impl StoreError {
    /// Classify an insert failure for the given entity and key.
    ///
    /// Maps SQLite's extended constraint codes onto `DuplicateKey` and
    /// `ForeignKeyViolation`; everything else passes through as
    /// `Database`.
    pub(crate) fn classify_insert(
        err: rusqlite::Error,
        entity: &'static str,
        key: impl Into<String>,
    ) -> Self {
        if let rusqlite::Error::SqliteFailure(cause, _) = &err {
            match cause.extended_code {
                ffi::SQLITE_CONSTRAINT_PRIMARYKEY | ffi::SQLITE_CONSTRAINT_UNIQUE => {
                    return StoreError::DuplicateKey {
                        entity,
                        key: key.into(),
                    }
                }
                ffi::SQLITE_CONSTRAINT_FOREIGNKEY => {
                    return StoreError::ForeignKeyViolation {
                        entity,
                        key: key.into(),
                    }
                }
                _ => {}
            }
        }
        StoreError::Database(err)
    }

    /// Classify a single-row lookup failure for the given entity and key
    pub(crate) fn classify_lookup(
        err: rusqlite::Error,
        entity: &'static str,
        key: impl Into<String>,
    ) -> Self {
        match err {
            rusqlite::Error::QueryReturnedNoRows => StoreError::NotFound {
                entity,
                key: key.into(),
            },
            other => StoreError::Database(other),
        }
    }

    /// NotFound for a mutation that affected zero rows
    pub(crate) fn not_found(entity: &'static str, key: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity,
            key: key.into(),
        }
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;
