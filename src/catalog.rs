//! Versioned, immutable catalog of levels, badges and daily tasks.
//!
//! Built in by default, or loaded once from a JSON file at startup. The
//! engine holds it behind an `Arc` and never mutates it.

use crate::badges::{BadgeDefinition, DEFAULT_BADGES};
use crate::core::constants::BUILTIN_CATALOG_VERSION;
use crate::core::error::{LoyaltyError, Result};
use crate::levels::{LevelTable, LevelThreshold, DEFAULT_LEVELS};
use crate::tasks::{DailyTaskDefinition, DEFAULT_TASKS};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// On-disk catalog shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogFile {
    pub version: u32,
    pub levels: Vec<LevelThreshold>,
    pub badges: Vec<BadgeDefinition>,
    pub tasks: Vec<DailyTaskDefinition>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    version: u32,
    levels: LevelTable,
    badges: Vec<BadgeDefinition>,
    tasks: Vec<DailyTaskDefinition>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            version: BUILTIN_CATALOG_VERSION,
            levels: LevelTable::default(),
            badges: DEFAULT_BADGES.to_vec(),
            tasks: DEFAULT_TASKS.to_vec(),
        }
    }
}

impl Catalog {
    /// Validate and assemble a catalog.
    pub fn new(
        version: u32,
        levels: Vec<LevelThreshold>,
        badges: Vec<BadgeDefinition>,
        tasks: Vec<DailyTaskDefinition>,
    ) -> Result<Self> {
        let levels = LevelTable::new(levels)?;

        let mut seen: HashSet<&str> = HashSet::new();
        for badge in &badges {
            if !seen.insert(&*badge.id) {
                return Err(LoyaltyError::configuration(format!(
                    "duplicate badge id {}",
                    badge.id
                )));
            }
            if badge.max_progress == 0 {
                return Err(LoyaltyError::configuration(format!(
                    "badge {} has a zero target",
                    badge.id
                )));
            }
        }

        let mut seen: HashSet<&str> = HashSet::new();
        for task in &tasks {
            if !seen.insert(&*task.id) {
                return Err(LoyaltyError::configuration(format!(
                    "duplicate task id {}",
                    task.id
                )));
            }
            if task.max_progress == 0 || task.reward == 0 {
                return Err(LoyaltyError::configuration(format!(
                    "task {} needs a positive target and reward",
                    task.id
                )));
            }
        }

        Ok(Self {
            version,
            levels,
            badges,
            tasks,
        })
    }

    pub fn from_file_data(file: CatalogFile) -> Result<Self> {
        Self::new(file.version, file.levels, file.badges, file.tasks)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(json)
            .map_err(|e| LoyaltyError::configuration(format!("catalog is not valid JSON: {}", e)))?;
        Self::from_file_data(file)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&json)?;
        tracing::info!(
            path = %path.display(),
            version = catalog.version,
            badges = catalog.badges.len(),
            tasks = catalog.tasks.len(),
            "Catalog loaded"
        );
        Ok(catalog)
    }

    /// The catalog in its on-disk shape, e.g. for `loyalty catalog > file.json`.
    pub fn to_file_data(&self) -> CatalogFile {
        CatalogFile {
            version: self.version,
            levels: self.levels.thresholds().to_vec(),
            badges: self.badges.clone(),
            tasks: self.tasks.clone(),
        }
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn levels(&self) -> &LevelTable {
        &self.levels
    }

    pub fn badges(&self) -> &[BadgeDefinition] {
        &self.badges
    }

    pub fn tasks(&self) -> &[DailyTaskDefinition] {
        &self.tasks
    }
}

/// Built-in catalog in file form.
pub fn builtin_catalog_file() -> CatalogFile {
    CatalogFile {
        version: BUILTIN_CATALOG_VERSION,
        levels: DEFAULT_LEVELS.to_vec(),
        badges: DEFAULT_BADGES.to_vec(),
        tasks: DEFAULT_TASKS.to_vec(),
    }
}
