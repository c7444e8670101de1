use std::time::Duration;

// Points
pub const LOGIN_BONUS_POINTS: u64 = 10;
pub const POINTS_PER_CURRENCY_UNIT: f64 = 1.0;

// Leaderboard
pub const DEFAULT_LEADERBOARD_LIMIT: usize = 10;

// Daily tasks the engine advances on its own
pub const LOGIN_TASK_ID: &str = "login";
pub const FAVORITE_TASK_ID: &str = "favorite";
pub const PURCHASE_TASK_ID: &str = "purchase";

// Catalog
pub const BUILTIN_CATALOG_VERSION: u32 = 1;

// Persistence
pub const APP_NAME: &str = "loyalty";
pub const CONFIG_FILE_NAME: &str = "loyalty.json";
pub const USERS_DIR_NAME: &str = "users";
pub const CONFIG_PATH_ENV: &str = "LOYALTY_CONFIG";

// Record locks for stores shared between processes
pub const LOCK_WAIT_TIMEOUT: Duration = Duration::from_secs(5);
pub const LOCK_POLL_INTERVAL: Duration = Duration::from_millis(5);
pub const LOCK_STALE_AFTER: Duration = Duration::from_secs(30);
