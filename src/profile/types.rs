//! Profile state, outward views, and operation outcomes.

use crate::badges::types::EarnedBadge;
use crate::core::constants::{LOGIN_BONUS_POINTS, POINTS_PER_CURRENCY_UNIT};
use crate::levels::LevelName;
use crate::tasks::types::{DailyTaskInstance, DailyTaskView};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Counters the engine reads when checking badges.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Statistics {
    pub total_purchases: u64,
    pub total_spent: f64,
    pub favorite_products: u64,
    pub login_streak: u64,
    pub last_login_date: Option<NaiveDate>,
    pub total_points_earned: u64,
    pub badges_earned: u64,
    pub tasks_completed: u64,
}

/// Gamification state owned by one user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GamificationProfile {
    pub points: u64,
    pub experience: u64,
    /// Derived from `points`; refreshed by every engine operation.
    pub level: LevelName,
    pub badges: Vec<EarnedBadge>,
    pub daily_tasks: Vec<DailyTaskInstance>,
    pub statistics: Statistics,
}

impl GamificationProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `amount` to points, experience and the lifetime total.
    pub fn credit(&mut self, amount: u64) {
        self.points = self.points.saturating_add(amount);
        self.experience = self.experience.saturating_add(amount);
        self.statistics.total_points_earned =
            self.statistics.total_points_earned.saturating_add(amount);
    }

    pub fn has_badge(&self, badge_id: &str) -> bool {
        self.badges.iter().any(|b| b.id == badge_id)
    }

    pub fn task(&self, task_id: &str) -> Option<&DailyTaskInstance> {
        self.daily_tasks.iter().find(|t| t.id == task_id)
    }
}

/// Persisted user document. The engine only touches `profile`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub profile: GamificationProfile,
}

impl UserRecord {
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            email: email.into(),
            profile: GamificationProfile::new(),
        }
    }
}

/// Tunable point amounts for engine-driven events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RewardRules {
    pub login_bonus_points: u64,
    pub points_per_currency_unit: f64,
}

impl Default for RewardRules {
    fn default() -> Self {
        Self {
            login_bonus_points: LOGIN_BONUS_POINTS,
            points_per_currency_unit: POINTS_PER_CURRENCY_UNIT,
        }
    }
}

/// Outward-facing profile state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
    pub points: u64,
    pub experience: u64,
    pub level: LevelName,
    pub next_level: Option<LevelName>,
    pub progress_to_next_level: f64,
    pub badges: Vec<EarnedBadge>,
    pub daily_tasks: Vec<DailyTaskView>,
    pub statistics: Statistics,
}

/// Side effects of a point-affecting mutation, for the caller to notify on.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PointsOutcome {
    pub level_up: bool,
    pub level: LevelName,
    pub new_badges: Vec<EarnedBadge>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginOutcome {
    /// False when the user already logged in today.
    pub bonus_awarded: bool,
    pub login_streak: u64,
    pub level_up: bool,
    pub level: LevelName,
    pub new_badges: Vec<EarnedBadge>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOutcome {
    pub points_awarded: u64,
    pub level_up: bool,
    pub level: LevelName,
    pub new_badges: Vec<EarnedBadge>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskProgressOutcome {
    pub task: DailyTaskInstance,
    pub level_up: bool,
    pub level: LevelName,
    pub new_badges: Vec<EarnedBadge>,
}

/// Externally sourced counters pushed in by the statistics source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsSnapshot {
    pub total_purchases: u64,
    pub total_spent: f64,
    pub favorite_products: u64,
}

/// One leaderboard row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedEntry {
    pub rank: usize,
    pub username: String,
    pub points: u64,
    pub level: LevelName,
    pub total_purchases: u64,
    pub total_spent: f64,
}
