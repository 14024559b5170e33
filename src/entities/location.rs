//! Physical locations assets can be kept at

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub location_id: i64,
    pub name: String,
    /// Free-form classification, e.g. "office" or "warehouse"
    #[serde(rename = "type")]
    pub location_type: String,
}
