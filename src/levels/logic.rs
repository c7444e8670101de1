//! Points → tier lookups.

use super::data::DEFAULT_LEVELS;
use super::types::{LevelName, LevelThreshold};
use crate::core::error::{LoyaltyError, Result};

/// Validated, ascending threshold table.
///
/// Invariants: non-empty, first threshold at 0 points, tiers and
/// `min_points` both strictly increasing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelTable {
    thresholds: Vec<LevelThreshold>,
}

impl Default for LevelTable {
    fn default() -> Self {
        Self {
            thresholds: DEFAULT_LEVELS.to_vec(),
        }
    }
}

impl LevelTable {
    pub fn new(thresholds: Vec<LevelThreshold>) -> Result<Self> {
        let first = thresholds
            .first()
            .ok_or_else(|| LoyaltyError::configuration("level table is empty"))?;
        if first.min_points != 0 {
            return Err(LoyaltyError::configuration(format!(
                "lowest level {} must start at 0 points, found {}",
                first.name, first.min_points
            )));
        }
        for pair in thresholds.windows(2) {
            let (lower, upper) = (&pair[0], &pair[1]);
            if upper.name <= lower.name {
                return Err(LoyaltyError::configuration(format!(
                    "level {} listed after {}",
                    upper.name, lower.name
                )));
            }
            if upper.min_points <= lower.min_points {
                return Err(LoyaltyError::configuration(format!(
                    "level {} threshold {} is not above {} ({})",
                    upper.name, upper.min_points, lower.name, lower.min_points
                )));
            }
        }
        Ok(Self { thresholds })
    }

    pub fn thresholds(&self) -> &[LevelThreshold] {
        &self.thresholds
    }

    /// Highest tier whose threshold is at or below `points`.
    pub fn level_of(&self, points: u64) -> LevelName {
        self.thresholds
            .iter()
            .rev()
            .find(|t| t.min_points <= points)
            .map_or(self.lowest(), |t| t.name)
    }

    /// Tier after `level`, or `None` at the top (or for a tier not in the table).
    pub fn next_level_of(&self, level: LevelName) -> Option<LevelName> {
        let index = self.thresholds.iter().position(|t| t.name == level)?;
        self.thresholds.get(index + 1).map(|t| t.name)
    }

    pub fn min_points(&self, level: LevelName) -> Option<u64> {
        self.thresholds
            .iter()
            .find(|t| t.name == level)
            .map(|t| t.min_points)
    }

    /// Percentage (0–100) of the way from `level`'s threshold to the next one.
    /// Exactly 100.0 when there is no next tier.
    pub fn progress_to_next_level(&self, points: u64, level: LevelName) -> f64 {
        let Some(next) = self.next_level_of(level) else {
            return 100.0;
        };
        let current_min = self.min_points(level).unwrap_or(0);
        let next_min = self.min_points(next).unwrap_or(current_min);
        let span = next_min.saturating_sub(current_min);
        if span == 0 {
            return 100.0;
        }
        let gained = points as f64 - current_min as f64;
        (gained / span as f64 * 100.0).clamp(0.0, 100.0)
    }

    fn lowest(&self) -> LevelName {
        self.thresholds
            .first()
            .map_or(LevelName::Bronze, |t| t.name)
    }
}
