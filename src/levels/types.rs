//! Level tiers and thresholds.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Loyalty tier. Ordering follows the tier ranking (Bronze lowest).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum LevelName {
    #[default]
    Bronze,
    Silver,
    Gold,
    Platinum,
    Diamond,
}

impl LevelName {
    /// All tiers in ascending order.
    pub const ALL: [LevelName; 5] = [
        LevelName::Bronze,
        LevelName::Silver,
        LevelName::Gold,
        LevelName::Platinum,
        LevelName::Diamond,
    ];

    /// Display name for the tier.
    pub fn name(&self) -> &'static str {
        match self {
            LevelName::Bronze => "Bronze",
            LevelName::Silver => "Silver",
            LevelName::Gold => "Gold",
            LevelName::Platinum => "Platinum",
            LevelName::Diamond => "Diamond",
        }
    }
}

impl fmt::Display for LevelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Minimum cumulative points for a tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelThreshold {
    pub name: LevelName,
    pub min_points: u64,
}
