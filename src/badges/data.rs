//! Built-in badge catalog.

use super::types::{BadgeDefinition, StatisticKey};
use std::borrow::Cow;

/// All badge definitions in display order.
pub const DEFAULT_BADGES: &[BadgeDefinition] = &[
    // ═══════════════════════════════════════════════════════════════
    // SHOPPING
    // ═══════════════════════════════════════════════════════════════
    BadgeDefinition {
        id: Cow::Borrowed("firstPurchase"),
        name: Cow::Borrowed("First Purchase"),
        description: Cow::Borrowed("Complete your first purchase"),
        icon: Cow::Borrowed("🛒"),
        max_progress: 1,
        statistic_key: StatisticKey::TotalPurchases,
    },
    BadgeDefinition {
        id: Cow::Borrowed("loyalCustomer"),
        name: Cow::Borrowed("Loyal Customer"),
        description: Cow::Borrowed("Complete 10 purchases"),
        icon: Cow::Borrowed("💎"),
        max_progress: 10,
        statistic_key: StatisticKey::TotalPurchases,
    },
    BadgeDefinition {
        id: Cow::Borrowed("bigSpender"),
        name: Cow::Borrowed("Big Spender"),
        description: Cow::Borrowed("Spend a total of 1,000"),
        icon: Cow::Borrowed("💰"),
        max_progress: 1000,
        statistic_key: StatisticKey::TotalSpent,
    },
    // ═══════════════════════════════════════════════════════════════
    // ENGAGEMENT
    // ═══════════════════════════════════════════════════════════════
    BadgeDefinition {
        id: Cow::Borrowed("streakMaster"),
        name: Cow::Borrowed("Streak Master"),
        description: Cow::Borrowed("Log in 7 days in a row"),
        icon: Cow::Borrowed("🔥"),
        max_progress: 7,
        statistic_key: StatisticKey::LoginStreak,
    },
    BadgeDefinition {
        id: Cow::Borrowed("collector"),
        name: Cow::Borrowed("Collector"),
        description: Cow::Borrowed("Add 10 products to your favorites"),
        icon: Cow::Borrowed("❤️"),
        max_progress: 10,
        statistic_key: StatisticKey::FavoriteProducts,
    },
    BadgeDefinition {
        id: Cow::Borrowed("taskMaster"),
        name: Cow::Borrowed("Task Master"),
        description: Cow::Borrowed("Complete 30 daily tasks"),
        icon: Cow::Borrowed("✅"),
        max_progress: 30,
        statistic_key: StatisticKey::TasksCompleted,
    },
];
