//! Profile aggregator: level, badges, tasks and statistics for one user.

pub mod logic;
pub mod types;

pub use logic::{
    add_points, get_view, leaderboard, record_favorite, record_login, record_purchase,
    sync_statistics, update_task_progress,
};
pub use types::{
    GamificationProfile, LoginOutcome, PointsOutcome, ProfileView, PurchaseOutcome, RankedEntry,
    RewardRules, Statistics, StatisticsSnapshot, TaskProgressOutcome, UserRecord,
};
