//! Classification taxonomy: categories and the types scoped under them

use serde::{Deserialize, Serialize};

/// Top-level equipment classification with the code prefix used in asset tags
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetCategory {
    pub category_id: i64,
    pub code_prefix: String,
    pub description: String,
}

impl AssetCategory {
    /// The prefix as it appears at the start of a tag, dash included
    pub fn tag_prefix(&self) -> String {
        format!("{}-", self.code_prefix)
    }
}

/// A type belonging to exactly one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetType {
    pub type_id: i64,
    pub category_id: i64,
    pub type_name: String,
}
