//! Asset status classification and lifecycle transitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of an asset, stored as its numeric code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetStatus {
    /// In use by someone (code 1)
    Assigned,
    /// On the shelf, ready to hand out (code 2)
    #[default]
    Available,
    /// Out for repair (code 3)
    UnderMaintenance,
    /// Decommissioned (code 4)
    Retired,
}

/// Semantic colour tag for a status label; the presentation layer picks the colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Info,
    Success,
    Warning,
    Danger,
    Neutral,
}

impl AssetStatus {
    /// Numeric code as stored in `assets.status_id`
    pub fn id(&self) -> i64 {
        match self {
            AssetStatus::Assigned => 1,
            AssetStatus::Available => 2,
            AssetStatus::UnderMaintenance => 3,
            AssetStatus::Retired => 4,
        }
    }

    /// Decode a stored code; `None` for anything outside 1..=4
    pub fn from_id(id: i64) -> Option<Self> {
        match id {
            1 => Some(AssetStatus::Assigned),
            2 => Some(AssetStatus::Available),
            3 => Some(AssetStatus::UnderMaintenance),
            4 => Some(AssetStatus::Retired),
            _ => None,
        }
    }

    pub fn all() -> &'static [AssetStatus] {
        &[
            AssetStatus::Assigned,
            AssetStatus::Available,
            AssetStatus::UnderMaintenance,
            AssetStatus::Retired,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AssetStatus::Assigned => "Assigned",
            AssetStatus::Available => "Available",
            AssetStatus::UnderMaintenance => "Under Maintenance",
            AssetStatus::Retired => "Retired",
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            AssetStatus::Assigned => Tone::Info,
            AssetStatus::Available => Tone::Success,
            AssetStatus::UnderMaintenance => Tone::Warning,
            AssetStatus::Retired => Tone::Danger,
        }
    }

    /// Statuses reachable from this one in a single change
    pub fn allowed_transitions(&self) -> Vec<AssetStatus> {
        match self {
            AssetStatus::Available => vec![
                AssetStatus::Assigned,
                AssetStatus::UnderMaintenance,
                AssetStatus::Retired,
            ],
            AssetStatus::Assigned => vec![
                AssetStatus::Available,
                AssetStatus::UnderMaintenance,
                AssetStatus::Retired,
            ],
            AssetStatus::UnderMaintenance => vec![AssetStatus::Available, AssetStatus::Retired],
            AssetStatus::Retired => vec![],
        }
    }

    pub fn can_transition_to(&self, to: AssetStatus) -> bool {
        self.allowed_transitions().contains(&to)
    }
}

impl fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AssetStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "1" | "assigned" => Ok(AssetStatus::Assigned),
            "2" | "available" => Ok(AssetStatus::Available),
            "3" | "undermaintenance" | "maintenance" => Ok(AssetStatus::UnderMaintenance),
            "4" | "retired" => Ok(AssetStatus::Retired),
            _ => Err(format!("Unknown status: {}", s)),
        }
    }
}

/// Display label and tone for a raw status code. Total: unknown codes are "Unknown"/neutral.
pub fn label(status_id: i64) -> (&'static str, Tone) {
    match AssetStatus::from_id(status_id) {
        Some(status) => (status.as_str(), status.tone()),
        None => ("Unknown", Tone::Neutral),
    }
}
