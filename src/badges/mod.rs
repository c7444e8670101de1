//! Badge catalog and award engine.
//!
//! Badges are data: each definition names the statistic that drives it and
//! the target value. Awarding is one-way; a held badge is never removed.

pub mod data;
pub mod logic;
pub mod types;

pub use data::DEFAULT_BADGES;
pub use logic::{badge_catalog_status, check_and_award, progress_for};
pub use types::{BadgeDefinition, BadgeStatus, EarnedBadge, StatisticKey};
