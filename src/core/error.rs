//! Error taxonomy for the inventory core

use chrono::NaiveDate;
use miette::Diagnostic;
use thiserror::Error;

use crate::core::date::DateParseError;
use crate::entities::status::AssetStatus;

/// Result alias used throughout the core
pub type Result<T> = std::result::Result<T, InventoryError>;

/// Errors surfaced by repositories, the schema loader and the form controller
#[derive(Debug, Error, Diagnostic)]
pub enum InventoryError {
    #[error("Storage error: {0}")]
    #[diagnostic(code(itrack::storage))]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    #[diagnostic(code(itrack::io))]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    #[diagnostic(
        code(itrack::date),
        help("Dates are written as YYYY-MM-DD, e.g. 2024-01-31")
    )]
    Parse(#[from] DateParseError),

    #[error(transparent)]
    #[diagnostic(code(itrack::consistency))]
    Consistency(#[from] ConsistencyError),

    #[error("Asset not found: {0}")]
    #[diagnostic(
        code(itrack::not_found),
        help("Use `itrack asset list` to see asset IDs and tags")
    )]
    NotFound(String),

    #[error("Invalid selection: {0}")]
    #[diagnostic(code(itrack::selection))]
    Selection(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(itrack::config))]
    Config(String),
}

/// A write that would break a relationship or ordering rule of the inventory model
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConsistencyError {
    #[error("Asset tag '{tag}' does not start with the category prefix '{expected}-'")]
    TagPrefixMismatch { tag: String, expected: String },

    #[error("Asset tag '{tag}' is not of the form PREFIX-SUFFIX")]
    MalformedTag { tag: String },

    #[error("No sequence number left after the highest '{prefix}' tag")]
    TagSequenceExhausted { prefix: String },

    #[error("Asset tag '{tag}' is already in use")]
    DuplicateTag { tag: String },

    #[error("Warranty end {warranty} is before purchase date {purchase}")]
    WarrantyBeforePurchase {
        purchase: NaiveDate,
        warranty: NaiveDate,
    },

    #[error("Unknown asset type: {type_id}")]
    UnknownType { type_id: i64 },

    #[error("Unknown category: {category_id}")]
    UnknownCategory { category_id: i64 },

    #[error("Unknown location: {location_id}")]
    UnknownLocation { location_id: i64 },

    #[error("Invalid status transition: {from} → {to}")]
    InvalidTransition { from: AssetStatus, to: AssetStatus },
}

impl InventoryError {
    /// The consistency violation behind this error, if that is what it is
    pub fn consistency(&self) -> Option<&ConsistencyError> {
        match self {
            InventoryError::Consistency(e) => Some(e),
            _ => None,
        }
    }
}
