//! SQLite-backed inventory store
//!
//! One connection per process, owned by [`Database`] and released on drop.
//! The schema and reference data are created on first open (see `schema`).

mod schema;

pub use schema::SCHEMA_VERSION;

use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::Connection;

use crate::core::error::Result;
use crate::core::repo::{AssetRepo, CategoryRepo, LocationRepo, TypeRepo};

/// An open inventory database
pub struct Database {
    conn: Connection,
    path: Option<PathBuf>,
}

impl Database {
    /// Open or create the database file at `path`, applying the schema if the file is empty
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        tracing::debug!(path = %path.display(), "opened database");

        Self::init(conn, Some(path.to_path_buf()))
    }

    /// Fresh in-memory database with schema and reference data (for tests and dry runs)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init(conn, None)
    }

    /// Wrap an already-open connection without touching its schema
    pub fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn, path: None })
    }

    fn init(conn: Connection, path: Option<PathBuf>) -> Result<Self> {
        let mut db = Self::from_connection(conn)?;
        db.path = path;
        db.apply_initial_migration()?;
        Ok(db)
    }

    /// Location of the database file, `None` for in-memory databases
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    pub fn categories(&self) -> CategoryRepo<'_> {
        CategoryRepo::new(&self.conn)
    }

    pub fn types(&self) -> TypeRepo<'_> {
        TypeRepo::new(&self.conn)
    }

    pub fn locations(&self) -> LocationRepo<'_> {
        LocationRepo::new(&self.conn)
    }

    pub fn assets(&self) -> AssetRepo<'_> {
        AssetRepo::new(&self.conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_open_creates_file_and_schema() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("nested/dir/inventory.db");

        let db = Database::open(&path).unwrap();
        assert!(path.exists());
        assert_eq!(db.path(), Some(path.as_path()));
        assert!(!db.categories().list().unwrap().is_empty());
    }

    #[test]
    fn test_reopen_keeps_data() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("inventory.db");

        let first = Database::open(&path).unwrap();
        first
            .conn()
            .execute(
                "INSERT INTO locations (name, type) VALUES ('Annex', 'storage')",
                [],
            )
            .unwrap();
        let count = first.locations().list().unwrap().len();
        drop(first);

        let second = Database::open(&path).unwrap();
        assert_eq!(second.locations().list().unwrap().len(), count);
    }

    #[test]
    fn test_foreign_keys_enforced() {
        let db = Database::open_in_memory().unwrap();
        let result = db.conn().execute(
            "INSERT INTO asset_types (category_id, type_name) VALUES (9999, 'Orphan')",
            [],
        );
        assert!(result.is_err());
    }
}
