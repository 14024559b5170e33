//! Repositories over the inventory tables
//!
//! Each repository borrows the process-wide connection. List operations return
//! an empty vector when there are no rows and fail only on storage errors.

mod assets;
mod categories;
mod locations;
mod types;

pub use assets::{AssetFilter, AssetRepo};
pub use categories::CategoryRepo;
pub use locations::LocationRepo;
pub use types::TypeRepo;

use crate::core::error::Result;
use crate::entities::{AssetCategory, AssetType, Location};

/// Reference data the asset form selects from
pub trait CatalogSource {
    fn list_categories(&self) -> Result<Vec<AssetCategory>>;

    fn list_types_by_category(&self, category_id: i64) -> Result<Vec<AssetType>>;

    fn list_locations(&self) -> Result<Vec<Location>>;
}

impl CatalogSource for crate::core::db::Database {
    fn list_categories(&self) -> Result<Vec<AssetCategory>> {
        self.categories().list()
    }

    fn list_types_by_category(&self, category_id: i64) -> Result<Vec<AssetType>> {
        self.assets().get_asset_types(category_id)
    }

    fn list_locations(&self) -> Result<Vec<Location>> {
        self.locations().list()
    }
}
