use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::core::error::Result;
use crate::entities::AssetCategory;

/// Read access to the category taxonomy
pub struct CategoryRepo<'a> {
    conn: &'a Connection,
}

impl<'a> CategoryRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// All categories ordered by id
    pub fn list(&self) -> Result<Vec<AssetCategory>> {
        let mut stmt = self.conn.prepare(
            "SELECT category_id, code_prefix, description FROM asset_categories ORDER BY category_id",
        )?;
        let rows = stmt.query_map([], from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn get(&self, category_id: i64) -> Result<Option<AssetCategory>> {
        let category = self
            .conn
            .query_row(
                "SELECT category_id, code_prefix, description FROM asset_categories WHERE category_id = ?1",
                params![category_id],
                from_row,
            )
            .optional()?;
        Ok(category)
    }

    /// Look up by code prefix, case-insensitive
    pub fn find_by_prefix(&self, code_prefix: &str) -> Result<Option<AssetCategory>> {
        let category = self
            .conn
            .query_row(
                "SELECT category_id, code_prefix, description FROM asset_categories
                 WHERE upper(code_prefix) = upper(?1)",
                params![code_prefix],
                from_row,
            )
            .optional()?;
        Ok(category)
    }
}

fn from_row(row: &Row<'_>) -> rusqlite::Result<AssetCategory> {
    Ok(AssetCategory {
        category_id: row.get(0)?,
        code_prefix: row.get(1)?,
        description: row.get(2)?,
    })
}
