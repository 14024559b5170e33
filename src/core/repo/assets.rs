use rusqlite::{params, Connection, OptionalExtension, Row};
use ulid::Ulid;

use super::{CategoryRepo, LocationRepo, TypeRepo};
use crate::core::date::{format_date, parse_stored_date};
use crate::core::error::{ConsistencyError, InventoryError, Result};
use crate::entities::asset::{sequenced_tag, split_tag};
use crate::entities::{Asset, AssetCategory, AssetDraft, AssetStatus, AssetType, HardwareSpecs};

const ASSET_COLUMNS: &str = "a.asset_id, a.asset_tag, a.type_id, a.status_id, a.serial_number, \
     a.make, a.model, a.processor, a.ram_gb, a.storage_tb, a.storage_type, a.operating_system, \
     a.purchase_date, a.warranty_end_date, a.location_id, a.notes";

/// Optional constraints for [`AssetRepo::list_filtered`]; `None` means no constraint
#[derive(Debug, Clone, Default)]
pub struct AssetFilter {
    pub status: Option<AssetStatus>,
    pub category_id: Option<i64>,
    pub location_id: Option<i64>,
    /// Case-insensitive substring over tag, serial number, maker and model
    pub search: Option<String>,
}

/// Create/read/update/delete access to asset records
pub struct AssetRepo<'a> {
    conn: &'a Connection,
}

impl<'a> AssetRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// All assets ordered by tag
    pub fn list(&self) -> Result<Vec<Asset>> {
        self.list_filtered(&AssetFilter::default())
    }

    pub fn list_filtered(&self, filter: &AssetFilter) -> Result<Vec<Asset>> {
        let sql = format!(
            "SELECT {ASSET_COLUMNS}
             FROM assets a LEFT JOIN asset_types t ON t.type_id = a.type_id
             WHERE (?1 IS NULL OR a.status_id = ?1)
               AND (?2 IS NULL OR t.category_id = ?2)
               AND (?3 IS NULL OR a.location_id = ?3)
               AND (?4 IS NULL
                    OR instr(lower(a.asset_tag), ?4) > 0
                    OR instr(lower(a.serial_number), ?4) > 0
                    OR instr(lower(a.make), ?4) > 0
                    OR instr(lower(a.model), ?4) > 0)
             ORDER BY a.asset_tag"
        );
        let search = filter
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_ascii_lowercase);

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(
            params![
                filter.status.map(|s| s.id()),
                filter.category_id,
                filter.location_id,
                search
            ],
            from_row,
        )?;
        let assets = rows.collect::<rusqlite::Result<Vec<_>>>()?;
        tracing::debug!(count = assets.len(), "listed assets");
        Ok(assets)
    }

    pub fn get(&self, asset_id: &str) -> Result<Option<Asset>> {
        let sql = format!("SELECT {ASSET_COLUMNS} FROM assets a WHERE a.asset_id = ?1");
        let asset = self
            .conn
            .query_row(&sql, params![asset_id], from_row)
            .optional()?;
        Ok(asset)
    }

    pub fn get_by_tag(&self, asset_tag: &str) -> Result<Option<Asset>> {
        let sql = format!("SELECT {ASSET_COLUMNS} FROM assets a WHERE a.asset_tag = ?1");
        let asset = self
            .conn
            .query_row(&sql, params![asset_tag], from_row)
            .optional()?;
        Ok(asset)
    }

    /// Resolve an asset by id, falling back to its tag
    pub fn find(&self, id_or_tag: &str) -> Result<Option<Asset>> {
        match self.get(id_or_tag)? {
            Some(asset) => Ok(Some(asset)),
            None => self.get_by_tag(id_or_tag),
        }
    }

    /// Types of a category, for the cascading form
    pub fn get_asset_types(&self, category_id: i64) -> Result<Vec<AssetType>> {
        TypeRepo::new(self.conn).list_by_category(category_id)
    }

    /// Next free sequenced tag for a category: one past the highest numeric suffix in use
    pub fn next_tag(&self, category_id: i64) -> Result<String> {
        let category = CategoryRepo::new(self.conn)
            .get(category_id)?
            .ok_or(ConsistencyError::UnknownCategory { category_id })?;
        self.next_tag_for(&category)
    }

    fn next_tag_for(&self, category: &AssetCategory) -> Result<String> {
        let prefix = category.tag_prefix();
        let mut stmt = self
            .conn
            .prepare("SELECT asset_tag FROM assets WHERE substr(asset_tag, 1, length(?1)) = ?1")?;
        let tags = stmt
            .query_map(params![prefix], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let highest = tags
            .iter()
            .filter_map(|tag| tag.strip_prefix(&prefix))
            .filter(|suffix| !suffix.is_empty() && suffix.bytes().all(|b| b.is_ascii_digit()))
            .filter_map(|suffix| suffix.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        let next = highest
            .checked_add(1)
            .ok_or(ConsistencyError::TagSequenceExhausted {
                prefix: category.code_prefix.clone(),
            })?;

        Ok(sequenced_tag(&category.code_prefix, next))
    }

    /// Persist a new asset.
    ///
    /// Assigns a ULID when the draft has no id and a sequenced tag when the draft
    /// tag is empty or only the category prefix.
    pub fn create(&self, draft: &AssetDraft) -> Result<Asset> {
        let tx = self.conn.unchecked_transaction()?;

        let asset_tag = self.validate(draft, None)?;
        let asset_id = draft
            .asset_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(String::from)
            .unwrap_or_else(|| Ulid::new().to_string());

        tx.execute(
            "INSERT INTO assets (asset_id, asset_tag, type_id, status_id, serial_number, make, model,
                                 processor, ram_gb, storage_tb, storage_type, operating_system,
                                 purchase_date, warranty_end_date, location_id, notes)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
            params![
                asset_id,
                asset_tag,
                draft.type_id,
                draft.status.id(),
                draft.serial_number,
                draft.maker,
                draft.model,
                draft.specs.processor,
                draft.specs.ram_gb,
                draft.specs.storage_tb,
                draft.specs.storage_type.map(|s| s.as_str()),
                draft.specs.operating_system,
                format_date(draft.purchase_date),
                draft.warranty_end_date.map(format_date),
                draft.location_id,
                draft.notes,
            ],
        )?;
        tx.commit()?;

        tracing::info!(asset_id = %asset_id, asset_tag = %asset_tag, "created asset");
        self.get(&asset_id)?
            .ok_or(InventoryError::NotFound(asset_id))
    }

    /// Replace the mutable fields of an existing asset.
    ///
    /// A status change in the draft must be a valid transition.
    pub fn update(&self, asset_id: &str, draft: &AssetDraft) -> Result<Asset> {
        let tx = self.conn.unchecked_transaction()?;

        let existing = self
            .get(asset_id)?
            .ok_or_else(|| InventoryError::NotFound(asset_id.to_string()))?;
        if draft.status.id() != existing.status_id {
            check_transition(&existing, draft.status)?;
        }
        let asset_tag = self.validate(draft, Some(&existing))?;

        tx.execute(
            "UPDATE assets SET asset_tag = ?2, type_id = ?3, status_id = ?4, serial_number = ?5,
                               make = ?6, model = ?7, processor = ?8, ram_gb = ?9, storage_tb = ?10,
                               storage_type = ?11, operating_system = ?12, purchase_date = ?13,
                               warranty_end_date = ?14, location_id = ?15, notes = ?16
             WHERE asset_id = ?1",
            params![
                asset_id,
                asset_tag,
                draft.type_id,
                draft.status.id(),
                draft.serial_number,
                draft.maker,
                draft.model,
                draft.specs.processor,
                draft.specs.ram_gb,
                draft.specs.storage_tb,
                draft.specs.storage_type.map(|s| s.as_str()),
                draft.specs.operating_system,
                format_date(draft.purchase_date),
                draft.warranty_end_date.map(format_date),
                draft.location_id,
                draft.notes,
            ],
        )?;
        tx.commit()?;

        tracing::info!(asset_id, asset_tag = %asset_tag, "updated asset");
        self.get(asset_id)?
            .ok_or_else(|| InventoryError::NotFound(asset_id.to_string()))
    }

    /// Move an asset through the status lifecycle
    pub fn change_status(&self, asset_id: &str, status: AssetStatus) -> Result<Asset> {
        let tx = self.conn.unchecked_transaction()?;

        let existing = self
            .get(asset_id)?
            .ok_or_else(|| InventoryError::NotFound(asset_id.to_string()))?;
        check_transition(&existing, status)?;

        tx.execute(
            "UPDATE assets SET status_id = ?2 WHERE asset_id = ?1",
            params![asset_id, status.id()],
        )?;
        tx.commit()?;

        tracing::info!(asset_id, from = existing.status_id, to = status.id(), "changed asset status");
        self.get(asset_id)?
            .ok_or_else(|| InventoryError::NotFound(asset_id.to_string()))
    }

    pub fn delete(&self, asset_id: &str) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        let removed = tx.execute("DELETE FROM assets WHERE asset_id = ?1", params![asset_id])?;
        if removed == 0 {
            return Err(InventoryError::NotFound(asset_id.to_string()));
        }
        tx.commit()?;

        tracing::info!(asset_id, "deleted asset");
        Ok(())
    }

    /// Check the draft against the category→type→asset chain and return the tag to store.
    /// `own` is the asset being replaced, whose current tag does not count as a duplicate.
    fn validate(&self, draft: &AssetDraft, own: Option<&Asset>) -> Result<String> {
        let asset_type = TypeRepo::new(self.conn)
            .get(draft.type_id)?
            .ok_or(ConsistencyError::UnknownType {
                type_id: draft.type_id,
            })?;
        let category = CategoryRepo::new(self.conn)
            .get(asset_type.category_id)?
            .ok_or(ConsistencyError::UnknownCategory {
                category_id: asset_type.category_id,
            })?;

        if LocationRepo::new(self.conn).get(draft.location_id)?.is_none() {
            return Err(ConsistencyError::UnknownLocation {
                location_id: draft.location_id,
            }
            .into());
        }

        if let Some(warranty) = draft.warranty_end_date {
            if warranty < draft.purchase_date {
                return Err(ConsistencyError::WarrantyBeforePurchase {
                    purchase: draft.purchase_date,
                    warranty,
                }
                .into());
            }
        }

        let tag = draft.asset_tag.trim();
        let tag_prefix = category.tag_prefix();
        let asset_tag = if tag.is_empty() || tag.eq_ignore_ascii_case(&tag_prefix) {
            self.next_tag_for(&category)?
        } else {
            // Prefixes may contain dashes themselves, so match the whole prefix
            let suffix = match tag.get(..tag_prefix.len()) {
                Some(head) if head.eq_ignore_ascii_case(&tag_prefix) => &tag[tag_prefix.len()..],
                _ if split_tag(tag).is_none() => {
                    return Err(ConsistencyError::MalformedTag {
                        tag: tag.to_string(),
                    }
                    .into());
                }
                _ => {
                    return Err(ConsistencyError::TagPrefixMismatch {
                        tag: tag.to_string(),
                        expected: category.code_prefix.clone(),
                    }
                    .into());
                }
            };
            let suffix = suffix.trim();
            if suffix.is_empty() || suffix.chars().any(char::is_whitespace) {
                return Err(ConsistencyError::MalformedTag {
                    tag: tag.to_string(),
                }
                .into());
            }
            format!("{}{}", tag_prefix, suffix)
        };

        if let Some(holder) = self.get_by_tag(&asset_tag)? {
            if own.map_or(true, |own| own.asset_id != holder.asset_id) {
                return Err(ConsistencyError::DuplicateTag { tag: asset_tag }.into());
            }
        }

        Ok(asset_tag)
    }
}

/// Rows with an unrecognised stored status may move to any status
fn check_transition(asset: &Asset, to: AssetStatus) -> Result<()> {
    if let Some(from) = asset.status() {
        if !from.can_transition_to(to) {
            return Err(ConsistencyError::InvalidTransition { from, to }.into());
        }
    }
    Ok(())
}

fn from_row(row: &Row<'_>) -> rusqlite::Result<Asset> {
    let storage_type: Option<String> = row.get(10)?;
    Ok(Asset {
        asset_id: row.get(0)?,
        asset_tag: row.get(1)?,
        type_id: row.get(2)?,
        status_id: row.get(3)?,
        serial_number: row.get(4)?,
        maker: row.get(5)?,
        model: row.get(6)?,
        specs: HardwareSpecs {
            processor: row.get(7)?,
            ram_gb: row.get(8)?,
            storage_tb: row.get(9)?,
            storage_type: storage_type.and_then(|s| s.parse().ok()),
            operating_system: row.get(11)?,
        },
        purchase_date: parse_stored_date("purchase_date", row.get(12)?),
        warranty_end_date: parse_stored_date("warranty_end_date", row.get(13)?),
        location_id: row.get(14)?,
        notes: row.get(15)?,
    })
}
