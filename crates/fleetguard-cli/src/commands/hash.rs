//! Virus hash command handlers

use anyhow::Result;
use fleetguard_core::{Store, VirusHash};

use crate::output::Output;

/// Register a new virus hash
pub fn register(store: &Store, key: String, description: String, output: &Output) -> Result<()> {
    let hash = VirusHash::new(key, description);
    store.virus_hashes().register(&hash)?;
    output.success(&format!("Registered virus hash {}", hash.hash_key));
    Ok(())
}

/// Check whether a fingerprint is in the denylist
pub fn check(store: &Store, key: String, output: &Output) -> Result<()> {
    let known = store.virus_hashes().exists(&key)?;
    output.print_bool(&format!("Hash {} known", key), known);
    Ok(())
}

/// List all virus hashes
pub fn list(store: &Store, output: &Output) -> Result<()> {
    let hashes = store.virus_hashes().list_all()?;
    output.print_hashes(&hashes);
    Ok(())
}
