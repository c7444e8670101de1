//! Badge definitions and per-user badge records.

use crate::profile::types::Statistics;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Which profile statistic drives a badge's progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StatisticKey {
    TotalPurchases,
    /// Floored to whole currency units
    TotalSpent,
    LoginStreak,
    FavoriteProducts,
    TasksCompleted,
}

impl StatisticKey {
    /// Current value of this statistic.
    pub fn read(&self, statistics: &Statistics) -> u64 {
        match self {
            StatisticKey::TotalPurchases => statistics.total_purchases,
            StatisticKey::TotalSpent => {
                let spent = statistics.total_spent;
                if spent.is_finite() && spent > 0.0 {
                    spent.floor() as u64
                } else {
                    0
                }
            }
            StatisticKey::LoginStreak => statistics.login_streak,
            StatisticKey::FavoriteProducts => statistics.favorite_products,
            StatisticKey::TasksCompleted => statistics.tasks_completed,
        }
    }
}

/// Static definition of a badge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeDefinition {
    pub id: Cow<'static, str>,
    pub name: Cow<'static, str>,
    pub description: Cow<'static, str>,
    pub icon: Cow<'static, str>,
    pub max_progress: u64,
    pub statistic_key: StatisticKey,
}

/// A badge a user holds.
///
/// `progress` is refreshed on every award check, so it can keep climbing
/// past `max_progress`; `earned_at` never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarnedBadge {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub max_progress: u64,
    pub earned_at: DateTime<Utc>,
    pub progress: u64,
}

impl EarnedBadge {
    pub fn from_definition(def: &BadgeDefinition, progress: u64, earned_at: DateTime<Utc>) -> Self {
        Self {
            id: def.id.to_string(),
            name: def.name.to_string(),
            description: def.description.to_string(),
            icon: def.icon.to_string(),
            max_progress: def.max_progress,
            earned_at,
            progress,
        }
    }
}

/// Earned flag and live progress for one catalog badge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeStatus {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub max_progress: u64,
    pub progress: u64,
    pub earned: bool,
    pub earned_at: Option<DateTime<Utc>>,
}
