//! Virus hash repository
//!
//! The content-fingerprint denylist. `exists` is the hot path: callers
//! check file fingerprints against it and get a plain boolean back.

use rusqlite::{params, Connection};

use crate::models::VirusHash;
use crate::storage::error::{StoreError, StoreResult};

const ENTITY: &str = "virus hash";

/// Typed access to the `virus_hash` table
pub struct VirusHashRepo<'conn> {
    conn: &'conn Connection,
}

impl<'conn> VirusHashRepo<'conn> {
    pub(crate) fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Register a new fingerprint; fails with `DuplicateKey` on collision
    pub fn register(&self, hash: &VirusHash) -> StoreResult<()> {
        self.conn
            .execute(
                "INSERT INTO virus_hash (hash_key, description) VALUES (?1, ?2)",
                params![hash.hash_key, hash.description],
            )
            .map_err(|e| StoreError::classify_insert(e, ENTITY, &hash.hash_key))?;
        Ok(())
    }

    /// Look up a fingerprint by key
    pub fn get(&self, hash_key: &str) -> StoreResult<VirusHash> {
        self.conn
            .query_row(
                "SELECT hash_key, description FROM virus_hash WHERE hash_key = ?1",
                params![hash_key],
                |row| {
                    Ok(VirusHash {
                        hash_key: row.get(0)?,
                        description: row.get(1)?,
                    })
                },
            )
            .map_err(|e| StoreError::classify_lookup(e, ENTITY, hash_key))
    }

    /// Whether the fingerprint is in the denylist; false, never an
    /// error, for an unknown key
    pub fn exists(&self, hash_key: &str) -> StoreResult<bool> {
        let mut stmt = self
            .conn
            .prepare("SELECT 1 FROM virus_hash WHERE hash_key = ?1")?;
        stmt.exists(params![hash_key]).map_err(Into::into)
    }

    /// All fingerprint keys, in no guaranteed order
    pub fn list_keys(&self) -> StoreResult<Vec<String>> {
        let mut stmt = self.conn.prepare("SELECT hash_key FROM virus_hash")?;
        let keys = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(keys)
    }

    /// All fingerprints
    pub fn list_all(&self) -> StoreResult<Vec<VirusHash>> {
        let mut stmt = self
            .conn
            .prepare("SELECT hash_key, description FROM virus_hash")?;
        let hashes = stmt
            .query_map([], |row| {
                Ok(VirusHash {
                    hash_key: row.get(0)?,
                    description: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(hashes)
    }

    /// Number of registered fingerprints
    pub fn count(&self) -> StoreResult<i64> {
        self.conn
            .query_row("SELECT COUNT(*) FROM virus_hash", [], |row| row.get(0))
            .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::schema::init_schema;

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("PRAGMA foreign_keys = ON;").unwrap();
        init_schema(&conn).unwrap();
        conn
    }

    #[test]
    fn test_round_trip() {
        let conn = test_conn();
        let repo = VirusHashRepo::new(&conn);

        let hash = VirusHash::new("UVUUNNU", "Totally");
        repo.register(&hash).unwrap();
        assert_eq!(repo.get("UVUUNNU").unwrap(), hash);
    }

    #[test]
    fn test_duplicate_rejected() {
        let conn = test_conn();
        let repo = VirusHashRepo::new(&conn);

        repo.register(&VirusHash::new("YUCWZXB", "not a")).unwrap();
        let err = repo
            .register(&VirusHash::new("YUCWZXB", "different"))
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateKey { .. }));
        assert_eq!(repo.get("YUCWZXB").unwrap().description, "not a");
    }

    #[test]
    fn test_exists_tolerates_unknown_key() {
        let conn = test_conn();
        let repo = VirusHashRepo::new(&conn);

        repo.register(&VirusHash::new("OPMIMOIBTV", "virus")).unwrap();

        assert!(repo.exists("OPMIMOIBTV").unwrap());
        assert!(!repo.exists("NO HASH HERE").unwrap());
    }

    #[test]
    fn test_enumeration() {
        let conn = test_conn();
        let repo = VirusHashRepo::new(&conn);

        repo.register(&VirusHash::new("UVUUNNU", "Totally")).unwrap();
        repo.register(&VirusHash::new("YUCWZXB", "not a")).unwrap();
        repo.register(&VirusHash::new("OPMIMOIBTV", "virus")).unwrap();

        assert_eq!(repo.list_keys().unwrap().len(), 3);
        assert_eq!(repo.list_all().unwrap().len(), 3);
        assert_eq!(repo.count().unwrap(), 3);
    }
}
