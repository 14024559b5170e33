//! Entity types for the inventory model

pub mod asset;
pub mod category;
pub mod location;
pub mod status;

pub use asset::{Asset, AssetDraft, HardwareSpecs, StorageType};
pub use category::{AssetCategory, AssetType};
pub use location::Location;
pub use status::{AssetStatus, Tone};
