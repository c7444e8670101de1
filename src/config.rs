//! Engine configuration, read from a JSON file with every field defaulted.

use crate::catalog::Catalog;
use crate::core::constants::{
    APP_NAME, CONFIG_FILE_NAME, CONFIG_PATH_ENV, DEFAULT_LEADERBOARD_LIMIT, LOGIN_BONUS_POINTS,
    POINTS_PER_CURRENCY_UNIT, USERS_DIR_NAME,
};
use crate::core::error::{LoyaltyError, Result};
use crate::profile::RewardRules;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    pub login_bonus_points: u64,
    pub points_per_currency_unit: f64,
    pub leaderboard_limit: usize,
    pub data_dir: PathBuf,
    /// JSON catalog to use instead of the built-in one.
    pub catalog_path: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            login_bonus_points: LOGIN_BONUS_POINTS,
            points_per_currency_unit: POINTS_PER_CURRENCY_UNIT,
            leaderboard_limit: DEFAULT_LEADERBOARD_LIMIT,
            data_dir: default_data_dir(),
            catalog_path: None,
        }
    }
}

/// Platform data directory, e.g. `~/.local/share/loyalty` on Linux.
pub fn default_data_dir() -> PathBuf {
    ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".loyalty"))
}

/// `$LOYALTY_CONFIG`, else the platform config directory.
pub fn default_config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
        return Some(PathBuf::from(path));
    }
    ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

impl EngineConfig {
    /// Load from `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };
        Self::from_json_str(&json)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| LoyaltyError::configuration(format!("config is not valid JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.points_per_currency_unit.is_finite() || self.points_per_currency_unit < 0.0 {
            return Err(LoyaltyError::configuration(format!(
                "pointsPerCurrencyUnit must be a non-negative number, got {}",
                self.points_per_currency_unit
            )));
        }
        if self.leaderboard_limit == 0 {
            return Err(LoyaltyError::configuration(
                "leaderboardLimit must be at least 1",
            ));
        }
        Ok(())
    }

    pub fn reward_rules(&self) -> RewardRules {
        RewardRules {
            login_bonus_points: self.login_bonus_points,
            points_per_currency_unit: self.points_per_currency_unit,
        }
    }

    /// The configured catalog file, or the built-in catalog.
    pub fn load_catalog(&self) -> Result<Catalog> {
        match &self.catalog_path {
            Some(path) => Catalog::from_json_file(path),
            None => Ok(Catalog::default()),
        }
    }

    pub fn users_dir(&self) -> PathBuf {
        self.data_dir.join(USERS_DIR_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = EngineConfig::load(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.login_bonus_points, 10);
        assert_eq!(config.leaderboard_limit, 10);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config =
            EngineConfig::from_json_str(r#"{"loginBonusPoints": 25, "dataDir": "/tmp/x"}"#).unwrap();
        assert_eq!(config.login_bonus_points, 25);
        assert_eq!(config.data_dir, PathBuf::from("/tmp/x"));
        assert_eq!(config.users_dir(), PathBuf::from("/tmp/x/users"));
        assert_eq!(config.points_per_currency_unit, 1.0);
        assert!(config.catalog_path.is_none());
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(EngineConfig::from_json_str(r#"{"leaderboardLimit": 0}"#).is_err());
        assert!(EngineConfig::from_json_str(r#"{"pointsPerCurrencyUnit": -2}"#).is_err());
        let err = EngineConfig::from_json_str("not json").unwrap_err();
        assert!(matches!(err, LoyaltyError::Configuration(_)));
    }

    #[test]
    fn test_catalog_path_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        let mut file = crate::catalog::builtin_catalog_file();
        file.version = 7;
        fs::write(&path, serde_json::to_string(&file).unwrap()).unwrap();

        let config = EngineConfig {
            catalog_path: Some(path),
            ..EngineConfig::default()
        };
        assert_eq!(config.load_catalog().unwrap().version(), 7);
        assert_eq!(EngineConfig::default().load_catalog().unwrap(), Catalog::default());
    }

    #[test]
    fn test_reward_rules_follow_config() {
        let config = EngineConfig {
            login_bonus_points: 3,
            points_per_currency_unit: 0.5,
            ..EngineConfig::default()
        };
        let rules = config.reward_rules();
        assert_eq!(rules.login_bonus_points, 3);
        assert_eq!(rules.points_per_currency_unit, 0.5);
    }
}
