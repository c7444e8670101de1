//! Daily task definitions and per-day instances.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Static definition of a daily task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTaskDefinition {
    pub id: Cow<'static, str>,
    pub name: Cow<'static, str>,
    pub description: Cow<'static, str>,
    pub reward: u64,
    pub max_progress: u64,
}

/// A user's copy of a task for one local day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTaskInstance {
    pub id: String,
    pub completed: bool,
    pub progress: u64,
    /// First local day on which this instance is no longer current.
    pub expires_at: NaiveDate,
}

impl DailyTaskInstance {
    pub fn fresh(def: &DailyTaskDefinition, expires_at: NaiveDate) -> Self {
        Self {
            id: def.id.to_string(),
            completed: false,
            progress: 0,
            expires_at,
        }
    }

    /// Still current on `today`.
    pub fn is_current(&self, today: NaiveDate) -> bool {
        today < self.expires_at
    }
}

/// Instance joined with its definition, for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTaskView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub reward: u64,
    pub max_progress: u64,
    pub progress: u64,
    pub completed: bool,
    pub expires_at: NaiveDate,
}

impl DailyTaskView {
    pub fn new(def: &DailyTaskDefinition, instance: &DailyTaskInstance) -> Self {
        Self {
            id: instance.id.clone(),
            name: def.name.to_string(),
            description: def.description.to_string(),
            reward: def.reward,
            max_progress: def.max_progress,
            progress: instance.progress,
            completed: instance.completed,
            expires_at: instance.expires_at,
        }
    }
}
