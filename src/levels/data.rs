//! Built-in level thresholds.

use super::types::{LevelName, LevelThreshold};

/// Default tier table in ascending order.
pub const DEFAULT_LEVELS: &[LevelThreshold] = &[
    LevelThreshold {
        name: LevelName::Bronze,
        min_points: 0,
    },
    LevelThreshold {
        name: LevelName::Silver,
        min_points: 100,
    },
    LevelThreshold {
        name: LevelName::Gold,
        min_points: 500,
    },
    LevelThreshold {
        name: LevelName::Platinum,
        min_points: 1500,
    },
    LevelThreshold {
        name: LevelName::Diamond,
        min_points: 5000,
    },
];
