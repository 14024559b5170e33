//! Core module - storage, validation and form state for the inventory

pub mod config;
pub mod date;
pub mod db;
pub mod error;
pub mod form;
pub mod repo;

pub use config::Config;
pub use date::{add_one_year, format_date, parse_date, DateParseError};
pub use db::Database;
pub use error::{ConsistencyError, InventoryError, Result};
pub use form::AssetForm;
pub use repo::{AssetFilter, AssetRepo, CatalogSource, CategoryRepo, LocationRepo, TypeRepo};
