//! Built-in daily task catalog.

use super::types::DailyTaskDefinition;
use std::borrow::Cow;

pub const DEFAULT_TASKS: &[DailyTaskDefinition] = &[
    DailyTaskDefinition {
        id: Cow::Borrowed("login"),
        name: Cow::Borrowed("Daily Check-in"),
        description: Cow::Borrowed("Log in to the store"),
        reward: 10,
        max_progress: 1,
    },
    DailyTaskDefinition {
        id: Cow::Borrowed("favorite"),
        name: Cow::Borrowed("Wishlist Builder"),
        description: Cow::Borrowed("Add 3 products to your favorites"),
        reward: 25,
        max_progress: 3,
    },
    DailyTaskDefinition {
        id: Cow::Borrowed("purchase"),
        name: Cow::Borrowed("Shopper"),
        description: Cow::Borrowed("Complete a purchase"),
        reward: 50,
        max_progress: 1,
    },
    DailyTaskDefinition {
        id: Cow::Borrowed("browse"),
        name: Cow::Borrowed("Window Shopping"),
        description: Cow::Borrowed("View 5 products"),
        reward: 15,
        max_progress: 5,
    },
];
