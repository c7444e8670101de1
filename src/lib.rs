//! Loyalty - storefront points, levels, badges and daily tasks.
//!
//! The engine tracks a user's points, derives their tier, awards badges from
//! live statistics, and rotates a daily task list. User persistence and
//! notification delivery are plugged in through [`UserStore`] and
//! [`Notifier`].

pub mod badges;
pub mod build_info;
pub mod catalog;
pub mod config;
pub mod core;
pub mod engine;
pub mod levels;
pub mod notify;
pub mod profile;
pub mod store;
pub mod tasks;

pub use badges::{BadgeDefinition, BadgeStatus, EarnedBadge, StatisticKey};
pub use catalog::Catalog;
pub use config::EngineConfig;
pub use core::{Clock, FixedClock, LoyaltyError, Result, SystemClock};
pub use engine::LoyaltyEngine;
pub use levels::{LevelName, LevelTable};
pub use notify::{LogNotifier, NotificationKind, Notifier, NotifyError, RecordingNotifier};
pub use profile::{
    GamificationProfile, LoginOutcome, PointsOutcome, ProfileView, PurchaseOutcome, RankedEntry,
    RewardRules, Statistics, StatisticsSnapshot, UserRecord,
};
pub use store::{JsonUserStore, MemoryUserStore, RecordLock, UserStore};
pub use tasks::{DailyTaskDefinition, DailyTaskInstance};
