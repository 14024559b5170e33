//! Asset records and the draft used to create or replace them

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::entities::status::{self, AssetStatus, Tone};

/// Storage technology of an asset's primary drive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorageType {
    #[serde(rename = "HDD")]
    Hdd,
    #[serde(rename = "SSD")]
    Ssd,
    Hybrid,
}

impl StorageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageType::Hdd => "HDD",
            StorageType::Ssd => "SSD",
            StorageType::Hybrid => "Hybrid",
        }
    }
}

impl fmt::Display for StorageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for StorageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hdd" => Ok(StorageType::Hdd),
            "ssd" => Ok(StorageType::Ssd),
            "hybrid" => Ok(StorageType::Hybrid),
            _ => Err(format!("Unknown storage type: {}", s)),
        }
    }
}

/// Optional hardware details, mostly relevant for computers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HardwareSpecs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ram_gb: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_tb: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_type: Option<StorageType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operating_system: Option<String>,
}

/// An asset as read back from storage.
///
/// Dates that failed to parse on read are `None`, and `status_id` is kept raw so
/// rows with an unrecognised code stay listable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub asset_id: String,
    pub asset_tag: String,
    pub type_id: i64,
    pub status_id: i64,
    pub serial_number: String,
    pub maker: String,
    pub model: String,
    #[serde(flatten)]
    pub specs: HardwareSpecs,
    pub purchase_date: Option<NaiveDate>,
    pub warranty_end_date: Option<NaiveDate>,
    pub location_id: i64,
    pub notes: Option<String>,
}

impl Asset {
    pub fn status(&self) -> Option<AssetStatus> {
        AssetStatus::from_id(self.status_id)
    }

    pub fn status_label(&self) -> (&'static str, Tone) {
        status::label(self.status_id)
    }

    /// "Maker Model" as shown in listings
    pub fn display_name(&self) -> String {
        format!("{} {}", self.maker, self.model).trim().to_string()
    }
}

/// Input for creating or replacing an asset.
///
/// A tag consisting of the bare category prefix (`LAP-`) or left empty asks the
/// repository to assign the next sequence number.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetDraft {
    pub asset_id: Option<String>,
    pub asset_tag: String,
    pub type_id: i64,
    pub status: AssetStatus,
    pub serial_number: String,
    pub maker: String,
    pub model: String,
    pub specs: HardwareSpecs,
    pub purchase_date: NaiveDate,
    pub warranty_end_date: Option<NaiveDate>,
    pub location_id: i64,
    pub notes: Option<String>,
}

impl AssetDraft {
    /// Draft pre-filled from an existing asset, for edits.
    /// Falls back to `fallback_purchase` when the stored purchase date was unreadable.
    pub fn from_asset(asset: &Asset, fallback_purchase: NaiveDate) -> Self {
        Self {
            asset_id: Some(asset.asset_id.clone()),
            asset_tag: asset.asset_tag.clone(),
            type_id: asset.type_id,
            status: asset.status().unwrap_or_default(),
            serial_number: asset.serial_number.clone(),
            maker: asset.maker.clone(),
            model: asset.model.clone(),
            specs: asset.specs.clone(),
            purchase_date: asset.purchase_date.unwrap_or(fallback_purchase),
            warranty_end_date: asset.warranty_end_date,
            location_id: asset.location_id,
            notes: asset.notes.clone(),
        }
    }
}

/// Split a tag into (prefix, suffix) on the first dash
pub fn split_tag(tag: &str) -> Option<(&str, &str)> {
    tag.split_once('-')
}

/// Format a sequenced tag, e.g. `LAP-0007`
pub fn sequenced_tag(code_prefix: &str, sequence: u64) -> String {
    format!("{}-{:04}", code_prefix, sequence)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_tag() {
        assert_eq!(split_tag("LAP-0001"), Some(("LAP", "0001")));
        assert_eq!(split_tag("LAP-"), Some(("LAP", "")));
        assert_eq!(split_tag("MON-A-7"), Some(("MON", "A-7")));
        assert_eq!(split_tag("NODASH"), None);
    }

    #[test]
    fn test_sequenced_tag() {
        assert_eq!(sequenced_tag("LAP", 1), "LAP-0001");
        assert_eq!(sequenced_tag("MON", 42), "MON-0042");
        assert_eq!(sequenced_tag("PRN", 12345), "PRN-12345");
    }

    #[test]
    fn test_storage_type_parse() {
        assert_eq!("ssd".parse::<StorageType>(), Ok(StorageType::Ssd));
        assert_eq!("HDD".parse::<StorageType>(), Ok(StorageType::Hdd));
        assert_eq!("Hybrid".parse::<StorageType>(), Ok(StorageType::Hybrid));
        assert!("tape".parse::<StorageType>().is_err());
    }

    #[test]
    fn test_unknown_status_label() {
        let asset = Asset {
            asset_id: "01TEST".to_string(),
            asset_tag: "LAP-0001".to_string(),
            type_id: 1,
            status_id: 9,
            serial_number: "SN1".to_string(),
            maker: "Dell".to_string(),
            model: "Latitude".to_string(),
            specs: HardwareSpecs::default(),
            purchase_date: None,
            warranty_end_date: None,
            location_id: 1,
            notes: None,
        };
        assert_eq!(asset.status(), None);
        assert_eq!(asset.status_label(), ("Unknown", Tone::Neutral));
        assert_eq!(asset.display_name(), "Dell Latitude");
    }
}
