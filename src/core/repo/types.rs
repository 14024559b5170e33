use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::core::error::Result;
use crate::entities::AssetType;

/// Read access to types, always scoped by category
pub struct TypeRepo<'a> {
    conn: &'a Connection,
}

impl<'a> TypeRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Types of one category ordered by id; empty for unknown categories
    pub fn list_by_category(&self, category_id: i64) -> Result<Vec<AssetType>> {
        let mut stmt = self.conn.prepare(
            "SELECT type_id, category_id, type_name FROM asset_types
             WHERE category_id = ?1 ORDER BY type_id",
        )?;
        let rows = stmt.query_map(params![category_id], from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn get(&self, type_id: i64) -> Result<Option<AssetType>> {
        let asset_type = self
            .conn
            .query_row(
                "SELECT type_id, category_id, type_name FROM asset_types WHERE type_id = ?1",
                params![type_id],
                from_row,
            )
            .optional()?;
        Ok(asset_type)
    }
}

fn from_row(row: &Row<'_>) -> rusqlite::Result<AssetType> {
    Ok(AssetType {
        type_id: row.get(0)?,
        category_id: row.get(1)?,
        type_name: row.get(2)?,
    })
}

#[cfg(test)]
mod tests {
    use crate::core::db::Database;

    #[test]
    fn test_types_scoped_to_category() {
        let db = Database::open_in_memory().unwrap();
        for category in db.categories().list().unwrap() {
            let types = db.types().list_by_category(category.category_id).unwrap();
            assert!(!types.is_empty(), "no seeded types for {}", category.code_prefix);
            assert!(types.iter().all(|t| t.category_id == category.category_id));
        }
    }

    #[test]
    fn test_unknown_category_is_empty_not_error() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.types().list_by_category(9999).unwrap().is_empty());
    }

    #[test]
    fn test_category_without_types() {
        let db = Database::open_in_memory().unwrap();
        db.conn()
            .execute(
                "INSERT INTO asset_categories (code_prefix, description) VALUES ('TAB', 'Tablets')",
                [],
            )
            .unwrap();
        let tab = db.categories().find_by_prefix("TAB").unwrap().unwrap();
        assert!(db.types().list_by_category(tab.category_id).unwrap().is_empty());
    }

    #[test]
    fn test_get_type() {
        let db = Database::open_in_memory().unwrap();
        let first = db.types().list_by_category(1).unwrap().remove(0);
        assert_eq!(db.types().get(first.type_id).unwrap(), Some(first));
        assert_eq!(db.types().get(-1).unwrap(), None);
    }
}
