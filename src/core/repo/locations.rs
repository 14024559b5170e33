use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::core::error::Result;
use crate::entities::Location;

/// Read access to physical locations
pub struct LocationRepo<'a> {
    conn: &'a Connection,
}

impl<'a> LocationRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn list(&self) -> Result<Vec<Location>> {
        let mut stmt = self
            .conn
            .prepare("SELECT location_id, name, \"type\" FROM locations ORDER BY location_id")?;
        let rows = stmt.query_map([], from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn get(&self, location_id: i64) -> Result<Option<Location>> {
        let location = self
            .conn
            .query_row(
                "SELECT location_id, name, \"type\" FROM locations WHERE location_id = ?1",
                params![location_id],
                from_row,
            )
            .optional()?;
        Ok(location)
    }
}

fn from_row(row: &Row<'_>) -> rusqlite::Result<Location> {
    Ok(Location {
        location_id: row.get(0)?,
        name: row.get(1)?,
        location_type: row.get(2)?,
    })
}
