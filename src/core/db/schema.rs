//! Schema creation and reference data seeding
//!
//! The schema is a list of single statements executed in order inside one
//! transaction. It runs only when the database has no tables at all.

use rusqlite::params;

use super::Database;
use crate::core::error::Result;

/// Version recorded in `schema_version` after the initial migration
pub const SCHEMA_VERSION: i64 = 1;

const SCHEMA: &[&str] = &[
    "CREATE TABLE schema_version (
        version INTEGER PRIMARY KEY
    )",
    "CREATE TABLE asset_categories (
        category_id INTEGER PRIMARY KEY,
        code_prefix TEXT NOT NULL UNIQUE CHECK (length(code_prefix) > 0),
        description TEXT NOT NULL
    )",
    "CREATE TABLE asset_types (
        type_id INTEGER PRIMARY KEY,
        category_id INTEGER NOT NULL REFERENCES asset_categories(category_id),
        type_name TEXT NOT NULL
    )",
    "CREATE INDEX idx_asset_types_category ON asset_types(category_id)",
    "CREATE TABLE locations (
        location_id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        \"type\" TEXT NOT NULL
    )",
    // purchase_date stays nullable so legacy rows with bad dates can still be loaded
    "CREATE TABLE assets (
        asset_id TEXT PRIMARY KEY,
        asset_tag TEXT NOT NULL UNIQUE,
        type_id INTEGER NOT NULL REFERENCES asset_types(type_id),
        status_id INTEGER NOT NULL,
        serial_number TEXT NOT NULL,
        make TEXT NOT NULL,
        model TEXT NOT NULL,
        processor TEXT,
        ram_gb INTEGER,
        storage_tb REAL,
        storage_type TEXT,
        operating_system TEXT,
        purchase_date TEXT,
        warranty_end_date TEXT,
        location_id INTEGER NOT NULL REFERENCES locations(location_id),
        notes TEXT
    )",
    "CREATE INDEX idx_assets_type ON assets(type_id)",
    "CREATE INDEX idx_assets_status ON assets(status_id)",
    "CREATE INDEX idx_assets_location ON assets(location_id)",
];

const SEED: &[&str] = &[
    "INSERT INTO asset_categories (category_id, code_prefix, description) VALUES
        (1, 'LAP', 'Laptops'),
        (2, 'DSK', 'Desktops'),
        (3, 'MON', 'Monitors'),
        (4, 'PRN', 'Printers'),
        (5, 'NET', 'Networking'),
        (6, 'PHN', 'Phones'),
        (7, 'PER', 'Peripherals')",
    "INSERT INTO asset_types (category_id, type_name) VALUES
        (1, 'Ultrabook'),
        (1, 'Workstation Laptop'),
        (1, 'Chromebook'),
        (2, 'Tower'),
        (2, 'Mini PC'),
        (2, 'All-in-One'),
        (3, 'Standard Monitor'),
        (3, 'Ultrawide Monitor'),
        (4, 'Laser Printer'),
        (4, 'Inkjet Printer'),
        (4, 'Multifunction Printer'),
        (5, 'Switch'),
        (5, 'Router'),
        (5, 'Access Point'),
        (6, 'Smartphone'),
        (6, 'Desk Phone'),
        (7, 'Docking Station'),
        (7, 'Keyboard'),
        (7, 'Mouse'),
        (7, 'Headset')",
    "INSERT INTO locations (name, \"type\") VALUES
        ('Head Office', 'office'),
        ('Branch Office', 'office'),
        ('Main Warehouse', 'warehouse'),
        ('Server Room', 'datacenter'),
        ('Repair Bench', 'workshop')",
];

impl Database {
    /// Number of user tables currently in the database
    pub(super) fn table_count(&self) -> Result<i64> {
        let count = self.conn.query_row(
            "SELECT COUNT(name) FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%'",
            [],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Create schema and reference data if the database is empty.
    ///
    /// Returns whether anything was applied. All-or-nothing: a failing
    /// statement rolls back every statement before it.
    pub(super) fn apply_initial_migration(&mut self) -> Result<bool> {
        if self.table_count()? > 0 {
            return Ok(false);
        }

        Self::run_statements(&mut self.conn, SCHEMA.iter().chain(SEED.iter()))?;
        tracing::info!(version = SCHEMA_VERSION, "applied initial schema");
        Ok(true)
    }

    fn run_statements<'s>(
        conn: &mut rusqlite::Connection,
        statements: impl Iterator<Item = &'s &'static str>,
    ) -> Result<()> {
        let tx = conn.transaction()?;
        for stmt in statements {
            tx.execute(stmt, [])?;
        }
        tx.execute(
            "INSERT INTO schema_version (version) VALUES (?1)",
            params![SCHEMA_VERSION],
        )?;
        tx.commit()?;
        Ok(())
    }

    /// Version recorded by the initial migration, 0 if none
    pub fn schema_version(&self) -> Result<i64> {
        let tracked: bool = self.conn.query_row(
            "SELECT EXISTS (SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'schema_version')",
            [],
            |row| row.get(0),
        )?;
        if !tracked {
            return Ok(0);
        }

        let version = self
            .conn
            .query_row("SELECT MAX(version) FROM schema_version", [], |row| {
                row.get::<_, Option<i64>>(0)
            })?;
        Ok(version.unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::InventoryError;
    use rusqlite::Connection;

    fn bare() -> Database {
        Database::from_connection(Connection::open_in_memory().unwrap()).unwrap()
    }

    #[test]
    fn test_migration_runs_once() {
        let mut db = bare();
        assert_eq!(db.table_count().unwrap(), 0);

        assert!(db.apply_initial_migration().unwrap());
        let tables = db.table_count().unwrap();
        assert_eq!(tables, 5);
        assert_eq!(db.schema_version().unwrap(), SCHEMA_VERSION);

        let categories = db.categories().list().unwrap().len();
        assert!(!db.apply_initial_migration().unwrap());
        assert_eq!(db.table_count().unwrap(), tables);
        assert_eq!(db.categories().list().unwrap().len(), categories);
    }

    #[test]
    fn test_migration_skipped_when_any_table_exists() {
        let mut db = bare();
        db.conn().execute_batch("CREATE TABLE unrelated (x INTEGER)").unwrap();

        assert!(!db.apply_initial_migration().unwrap());
        assert_eq!(db.schema_version().unwrap(), 0);
    }

    #[test]
    fn test_schema_version_surfaces_storage_errors() {
        let db = bare();
        db.conn()
            .execute_batch("CREATE TABLE schema_version (applied_at TEXT)")
            .unwrap();

        assert!(matches!(
            db.schema_version(),
            Err(InventoryError::Storage(_))
        ));
    }

    #[test]
    fn test_failed_migration_rolls_back() {
        let mut db = bare();
        let statements = [
            "CREATE TABLE schema_version (version INTEGER PRIMARY KEY)",
            "CREATE TABLE first (x INTEGER)",
            "INSERT INTO missing_table VALUES (1)",
        ];

        let result = Database::run_statements(&mut db.conn, statements.iter());
        assert!(result.is_err());
        assert_eq!(db.table_count().unwrap(), 0);
    }

    #[test]
    fn test_statements_with_semicolons_in_literals() {
        let mut db = bare();
        let statements = [
            "CREATE TABLE schema_version (version INTEGER PRIMARY KEY)",
            "CREATE TABLE notes (body TEXT)",
            "INSERT INTO notes (body) VALUES ('first; second; third')",
        ];

        Database::run_statements(&mut db.conn, statements.iter()).unwrap();
        let body: String = db
            .conn()
            .query_row("SELECT body FROM notes", [], |row| row.get(0))
            .unwrap();
        assert_eq!(body, "first; second; third");
    }

    #[test]
    fn test_seeded_prefixes_unique_and_non_empty() {
        let db = Database::open_in_memory().unwrap();
        let categories = db.categories().list().unwrap();
        let mut prefixes: Vec<_> = categories.iter().map(|c| c.code_prefix.clone()).collect();
        assert!(prefixes.iter().all(|p| !p.is_empty()));
        prefixes.sort();
        prefixes.dedup();
        assert_eq!(prefixes.len(), categories.len());
    }

    #[test]
    fn test_empty_prefix_rejected_by_schema() {
        let db = Database::open_in_memory().unwrap();
        let result = db.conn().execute(
            "INSERT INTO asset_categories (code_prefix, description) VALUES ('', 'Nothing')",
            [],
        );
        assert!(result.is_err());
    }
}
