//! Profile aggregation and point-affecting mutations.
//!
//! Every function here works on a profile value and returns a descriptor of
//! what happened (level-up, new badges). Persisting the profile and sending
//! notifications is left to the caller.

use super::types::{
    GamificationProfile, LoginOutcome, PointsOutcome, ProfileView, PurchaseOutcome, RankedEntry,
    RewardRules, StatisticsSnapshot, TaskProgressOutcome, UserRecord,
};
use crate::badges::{check_and_award, EarnedBadge};
use crate::catalog::Catalog;
use crate::core::clock::{local_day, utc_instant};
use crate::core::constants::{FAVORITE_TASK_ID, LOGIN_TASK_ID, PURCHASE_TASK_ID};
use crate::core::error::{LoyaltyError, Result};
use crate::levels::LevelName;
use crate::tasks::{advance_task, ensure_today, update_progress, DailyTaskView};
use chrono::{DateTime, FixedOffset};

/// Roll tasks over if needed and build the outward view.
pub fn get_view(
    catalog: &Catalog,
    profile: &mut GamificationProfile,
    now: DateTime<FixedOffset>,
) -> ProfileView {
    ensure_today(catalog.tasks(), profile, local_day(&now));

    let levels = catalog.levels();
    let level = levels.level_of(profile.points);
    profile.level = level;

    let daily_tasks = profile
        .daily_tasks
        .iter()
        .filter_map(|instance| {
            catalog
                .tasks()
                .iter()
                .find(|def| def.id == instance.id)
                .map(|def| DailyTaskView::new(def, instance))
        })
        .collect();

    ProfileView {
        points: profile.points,
        experience: profile.experience,
        level,
        next_level: levels.next_level_of(level),
        progress_to_next_level: levels.progress_to_next_level(profile.points, level),
        badges: profile.badges.clone(),
        daily_tasks,
        statistics: profile.statistics.clone(),
    }
}

/// Grant `delta` points for `reason`. `delta` must be positive.
pub fn add_points(
    catalog: &Catalog,
    profile: &mut GamificationProfile,
    delta: i64,
    reason: &str,
    now: DateTime<FixedOffset>,
) -> Result<PointsOutcome> {
    let amount = match u64::try_from(delta) {
        Ok(amount) if amount > 0 => amount,
        _ => {
            return Err(LoyaltyError::validation(format!(
                "point delta must be a positive integer, got {}",
                delta
            )))
        }
    };

    let before = catalog.levels().level_of(profile.points);
    profile.credit(amount);
    tracing::debug!(amount, reason, points = profile.points, "Points granted");

    Ok(settle(catalog, profile, before, now))
}

/// Record a login for the local day of `now`.
///
/// Pays the login bonus at most once per day and maintains the streak:
/// consecutive days extend it, any gap resets it to 1.
pub fn record_login(
    catalog: &Catalog,
    profile: &mut GamificationProfile,
    rules: &RewardRules,
    now: DateTime<FixedOffset>,
) -> LoginOutcome {
    let today = local_day(&now);
    ensure_today(catalog.tasks(), profile, today);

    if profile.statistics.last_login_date == Some(today) {
        let level = catalog.levels().level_of(profile.points);
        profile.level = level;
        return LoginOutcome {
            bonus_awarded: false,
            login_streak: profile.statistics.login_streak,
            level_up: false,
            level,
            new_badges: Vec::new(),
        };
    }

    let stats = &mut profile.statistics;
    stats.login_streak = match stats.last_login_date {
        Some(previous) if previous.succ_opt() == Some(today) => {
            stats.login_streak.saturating_add(1)
        }
        _ => 1,
    };
    stats.last_login_date = Some(today);

    let before = catalog.levels().level_of(profile.points);
    if rules.login_bonus_points > 0 {
        profile.credit(rules.login_bonus_points);
    }
    advance_task(catalog.tasks(), profile, LOGIN_TASK_ID, 1);

    let outcome = settle(catalog, profile, before, now);
    tracing::debug!(
        streak = profile.statistics.login_streak,
        points = profile.points,
        "Login recorded"
    );

    LoginOutcome {
        bonus_awarded: true,
        login_streak: profile.statistics.login_streak,
        level_up: outcome.level_up,
        level: outcome.level,
        new_badges: outcome.new_badges,
    }
}

/// Set a daily task's progress on today's set, then settle level and badges
/// (a task reward can cross a tier or unlock a task-count badge).
pub fn update_task_progress(
    catalog: &Catalog,
    profile: &mut GamificationProfile,
    task_id: &str,
    raw_progress: i64,
    now: DateTime<FixedOffset>,
) -> Result<TaskProgressOutcome> {
    ensure_today(catalog.tasks(), profile, local_day(&now));
    let before = catalog.levels().level_of(profile.points);
    let task = update_progress(catalog.tasks(), profile, task_id, raw_progress)?;

    let outcome = settle(catalog, profile, before, now);
    Ok(TaskProgressOutcome {
        task,
        level_up: outcome.level_up,
        level: outcome.level,
        new_badges: outcome.new_badges,
    })
}

/// Record a completed purchase of `amount_spent` currency units.
pub fn record_purchase(
    catalog: &Catalog,
    profile: &mut GamificationProfile,
    rules: &RewardRules,
    amount_spent: f64,
    now: DateTime<FixedOffset>,
) -> Result<PurchaseOutcome> {
    if !amount_spent.is_finite() || amount_spent < 0.0 {
        return Err(LoyaltyError::validation(format!(
            "purchase amount must be a non-negative number, got {}",
            amount_spent
        )));
    }

    ensure_today(catalog.tasks(), profile, local_day(&now));
    let before = catalog.levels().level_of(profile.points);

    profile.statistics.total_purchases =
        profile.statistics.total_purchases.saturating_add(1);
    profile.statistics.total_spent += amount_spent;

    let points_awarded = (amount_spent * rules.points_per_currency_unit).floor() as u64;
    if points_awarded > 0 {
        profile.credit(points_awarded);
    }
    advance_task(catalog.tasks(), profile, PURCHASE_TASK_ID, 1);

    let outcome = settle(catalog, profile, before, now);
    Ok(PurchaseOutcome {
        points_awarded,
        level_up: outcome.level_up,
        level: outcome.level,
        new_badges: outcome.new_badges,
    })
}

/// Record a favorite toggle. Only additions count toward the daily task.
pub fn record_favorite(
    catalog: &Catalog,
    profile: &mut GamificationProfile,
    added: bool,
    now: DateTime<FixedOffset>,
) -> PointsOutcome {
    ensure_today(catalog.tasks(), profile, local_day(&now));
    let before = catalog.levels().level_of(profile.points);

    let stats = &mut profile.statistics;
    if added {
        stats.favorite_products = stats.favorite_products.saturating_add(1);
        advance_task(catalog.tasks(), profile, FAVORITE_TASK_ID, 1);
    } else {
        stats.favorite_products = stats.favorite_products.saturating_sub(1);
    }

    settle(catalog, profile, before, now)
}

/// Overwrite externally sourced counters and re-check badges.
pub fn sync_statistics(
    catalog: &Catalog,
    profile: &mut GamificationProfile,
    snapshot: &StatisticsSnapshot,
    now: DateTime<FixedOffset>,
) -> Result<Vec<EarnedBadge>> {
    if !snapshot.total_spent.is_finite() || snapshot.total_spent < 0.0 {
        return Err(LoyaltyError::validation(format!(
            "total spent must be a non-negative number, got {}",
            snapshot.total_spent
        )));
    }

    let stats = &mut profile.statistics;
    stats.total_purchases = snapshot.total_purchases;
    stats.total_spent = snapshot.total_spent;
    stats.favorite_products = snapshot.favorite_products;

    Ok(check_and_award(catalog.badges(), profile, utc_instant(&now)))
}

/// Top `limit` users by points. Ties keep input order.
pub fn leaderboard(catalog: &Catalog, users: &[UserRecord], limit: usize) -> Vec<RankedEntry> {
    let mut ranked: Vec<&UserRecord> = users.iter().collect();
    ranked.sort_by(|a, b| b.profile.points.cmp(&a.profile.points));

    ranked
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(i, user)| RankedEntry {
            rank: i + 1,
            username: user.username.clone(),
            points: user.profile.points,
            level: catalog.levels().level_of(user.profile.points),
            total_purchases: user.profile.statistics.total_purchases,
            total_spent: user.profile.statistics.total_spent,
        })
        .collect()
}

/// Refresh the stored level against `before` and run the badge check.
fn settle(
    catalog: &Catalog,
    profile: &mut GamificationProfile,
    before: LevelName,
    now: DateTime<FixedOffset>,
) -> PointsOutcome {
    let after = catalog.levels().level_of(profile.points);
    profile.level = after;
    let level_up = after > before;
    if level_up {
        tracing::info!(from = %before, to = %after, points = profile.points, "Level up");
    }

    PointsOutcome {
        level_up,
        level: after,
        new_badges: check_and_award(catalog.badges(), profile, utc_instant(&now)),
    }
}
