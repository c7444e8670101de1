//! Badge progress and award checks.

use super::types::{BadgeDefinition, BadgeStatus, EarnedBadge};
use crate::core::error::{LoyaltyError, Result};
use crate::profile::types::{GamificationProfile, Statistics};
use chrono::{DateTime, Utc};

/// Live progress of `badge_id` against `statistics`.
pub fn progress_for(
    definitions: &[BadgeDefinition],
    statistics: &Statistics,
    badge_id: &str,
) -> Result<u64> {
    definitions
        .iter()
        .find(|d| d.id == badge_id)
        .map(|d| d.statistic_key.read(statistics))
        .ok_or_else(|| LoyaltyError::not_found("badge", badge_id))
}

/// Award every badge whose statistic has reached its target.
///
/// Returns only badges awarded by this call. Already-held badges get their
/// `progress` refreshed but are never re-awarded, so a second call with the
/// same statistics returns an empty list.
pub fn check_and_award(
    definitions: &[BadgeDefinition],
    profile: &mut GamificationProfile,
    now: DateTime<Utc>,
) -> Vec<EarnedBadge> {
    let mut awarded = Vec::new();

    for def in definitions {
        let progress = def.statistic_key.read(&profile.statistics);

        if let Some(held) = profile.badges.iter_mut().find(|b| b.id == def.id) {
            held.progress = progress;
            continue;
        }

        if progress >= def.max_progress {
            let badge = EarnedBadge::from_definition(def, progress, now);
            tracing::info!(badge = %badge.id, progress, "Badge awarded");
            profile.badges.push(badge.clone());
            profile.statistics.badges_earned =
                profile.statistics.badges_earned.saturating_add(1);
            awarded.push(badge);
        }
    }

    awarded
}

/// Earned flag and progress for every catalog badge, earned or not.
pub fn badge_catalog_status(
    definitions: &[BadgeDefinition],
    profile: &GamificationProfile,
) -> Vec<BadgeStatus> {
    definitions
        .iter()
        .map(|def| {
            let held = profile.badges.iter().find(|b| b.id == def.id);
            BadgeStatus {
                id: def.id.to_string(),
                name: def.name.to_string(),
                description: def.description.to_string(),
                icon: def.icon.to_string(),
                max_progress: def.max_progress,
                progress: def.statistic_key.read(&profile.statistics),
                earned: held.is_some(),
                earned_at: held.map(|b| b.earned_at),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::badges::data::DEFAULT_BADGES;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_progress_for_known_and_unknown() {
        let stats = Statistics {
            total_purchases: 3,
            ..Statistics::default()
        };
        assert_eq!(progress_for(DEFAULT_BADGES, &stats, "loyalCustomer").unwrap(), 3);
        let err = progress_for(DEFAULT_BADGES, &stats, "nope").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_nothing_awarded_on_fresh_profile() {
        let mut profile = GamificationProfile::new();
        assert!(check_and_award(DEFAULT_BADGES, &mut profile, t0()).is_empty());
        assert_eq!(profile.statistics.badges_earned, 0);
    }

    #[test]
    fn test_first_purchase_awarded_once() {
        let mut profile = GamificationProfile::new();
        profile.statistics.total_purchases = 1;

        let awarded = check_and_award(DEFAULT_BADGES, &mut profile, t0());
        assert_eq!(awarded.len(), 1);
        assert_eq!(awarded[0].id, "firstPurchase");
        assert_eq!(awarded[0].earned_at, t0());
        assert_eq!(profile.statistics.badges_earned, 1);

        // Same statistics: nothing new
        let again = check_and_award(DEFAULT_BADGES, &mut profile, t0() + Duration::hours(1));
        assert!(again.is_empty());
        assert_eq!(profile.statistics.badges_earned, 1);
        assert_eq!(profile.badges.iter().filter(|b| b.id == "firstPurchase").count(), 1);
    }

    #[test]
    fn test_badges_earned_counter_saturates() {
        let mut profile = GamificationProfile::new();
        profile.statistics.total_purchases = 1;
        profile.statistics.badges_earned = u64::MAX;

        let awarded = check_and_award(DEFAULT_BADGES, &mut profile, t0());
        assert_eq!(awarded.len(), 1);
        assert_eq!(profile.statistics.badges_earned, u64::MAX);
    }

    #[test]
    fn test_held_badge_progress_keeps_climbing() {
        let mut profile = GamificationProfile::new();
        profile.statistics.total_purchases = 1;
        check_and_award(DEFAULT_BADGES, &mut profile, t0());

        profile.statistics.total_purchases = 4;
        let later = t0() + Duration::days(2);
        assert!(check_and_award(DEFAULT_BADGES, &mut profile, later).is_empty());

        let held = profile.badges.iter().find(|b| b.id == "firstPurchase").unwrap();
        assert_eq!(held.progress, 4);
        assert_eq!(held.earned_at, t0());
    }

    #[test]
    fn test_multiple_badges_in_one_check() {
        let mut profile = GamificationProfile::new();
        profile.statistics.total_purchases = 12;
        profile.statistics.total_spent = 1000.0;

        let awarded = check_and_award(DEFAULT_BADGES, &mut profile, t0());
        let ids: Vec<_> = awarded.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["firstPurchase", "loyalCustomer", "bigSpender"]);
        assert_eq!(profile.statistics.badges_earned, 3);
    }

    #[test]
    fn test_badge_catalog_status_covers_every_badge() {
        let mut profile = GamificationProfile::new();
        profile.statistics.total_purchases = 1;
        profile.statistics.favorite_products = 4;
        check_and_award(DEFAULT_BADGES, &mut profile, t0());

        let status = badge_catalog_status(DEFAULT_BADGES, &profile);
        assert_eq!(status.len(), DEFAULT_BADGES.len());

        let first = status.iter().find(|s| s.id == "firstPurchase").unwrap();
        assert!(first.earned);
        assert_eq!(first.earned_at, Some(t0()));

        let collector = status.iter().find(|s| s.id == "collector").unwrap();
        assert!(!collector.earned);
        assert_eq!(collector.progress, 4);
        assert_eq!(collector.earned_at, None);
    }
}
