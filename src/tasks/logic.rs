//! Daily task rollover and progress.

use super::types::{DailyTaskDefinition, DailyTaskInstance};
use crate::core::error::{LoyaltyError, Result};
use crate::profile::types::GamificationProfile;
use chrono::NaiveDate;

/// One pending instance per definition, all expiring at the next local midnight.
pub fn fresh_tasks(definitions: &[DailyTaskDefinition], today: NaiveDate) -> Vec<DailyTaskInstance> {
    let expires_at = today.succ_opt().unwrap_or(NaiveDate::MAX);
    definitions
        .iter()
        .map(|def| DailyTaskInstance::fresh(def, expires_at))
        .collect()
}

/// Replace the task set with a fresh one when nothing in it is current.
///
/// A set is current while `today < expires_at`; at the local midnight it
/// expires on, it is replaced. Returns true if a reset happened. Yesterday's progress is discarded.
pub fn ensure_today(
    definitions: &[DailyTaskDefinition],
    profile: &mut GamificationProfile,
    today: NaiveDate,
) -> bool {
    if profile.daily_tasks.iter().any(|t| t.is_current(today)) {
        return false;
    }
    profile.daily_tasks = fresh_tasks(definitions, today);
    tracing::debug!(%today, tasks = profile.daily_tasks.len(), "Daily tasks reset");
    true
}

/// Set a task's progress, clamped to its target.
///
/// Reaching the target for the first time completes the task and pays its
/// reward. A completed task never pays again.
pub fn update_progress(
    definitions: &[DailyTaskDefinition],
    profile: &mut GamificationProfile,
    task_id: &str,
    raw_progress: i64,
) -> Result<DailyTaskInstance> {
    let index = profile
        .daily_tasks
        .iter()
        .position(|t| t.id == task_id)
        .ok_or_else(|| LoyaltyError::not_found("task", task_id))?;
    let def = find_definition(definitions, task_id)?;
    let raw = u64::try_from(raw_progress).map_err(|_| {
        LoyaltyError::validation(format!(
            "task progress must not be negative, got {}",
            raw_progress
        ))
    })?;
    Ok(apply_progress(profile, index, def, raw))
}

/// Move a task forward by `step`. Tasks that are missing from the active set
/// (or from the catalog) are skipped and yield `None`.
pub fn advance_task(
    definitions: &[DailyTaskDefinition],
    profile: &mut GamificationProfile,
    task_id: &str,
    step: u64,
) -> Option<DailyTaskInstance> {
    let index = profile.daily_tasks.iter().position(|t| t.id == task_id)?;
    let def = find_definition(definitions, task_id).ok()?;
    let target = profile.daily_tasks[index].progress.saturating_add(step);
    Some(apply_progress(profile, index, def, target))
}

fn find_definition<'a>(
    definitions: &'a [DailyTaskDefinition],
    task_id: &str,
) -> Result<&'a DailyTaskDefinition> {
    definitions
        .iter()
        .find(|d| d.id == task_id)
        .ok_or_else(|| LoyaltyError::not_found("task", task_id))
}

fn apply_progress(
    profile: &mut GamificationProfile,
    index: usize,
    def: &DailyTaskDefinition,
    raw: u64,
) -> DailyTaskInstance {
    let task = &mut profile.daily_tasks[index];
    if task.completed {
        task.progress = def.max_progress;
        return task.clone();
    }

    task.progress = raw.min(def.max_progress);
    if task.progress < def.max_progress {
        return task.clone();
    }

    task.completed = true;
    let snapshot = task.clone();
    profile.credit(def.reward);
    profile.statistics.tasks_completed =
        profile.statistics.tasks_completed.saturating_add(1);
    tracing::info!(task = %snapshot.id, reward = def.reward, "Daily task completed");
    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::data::DEFAULT_TASKS;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    fn profile_on(d: u32) -> GamificationProfile {
        let mut profile = GamificationProfile::new();
        ensure_today(DEFAULT_TASKS, &mut profile, day(d));
        profile
    }

    #[test]
    fn test_ensure_today_creates_one_per_definition() {
        let profile = profile_on(10);
        assert_eq!(profile.daily_tasks.len(), DEFAULT_TASKS.len());
        for (task, def) in profile.daily_tasks.iter().zip(DEFAULT_TASKS) {
            assert_eq!(task.id, def.id);
            assert_eq!(task.progress, 0);
            assert!(!task.completed);
            assert_eq!(task.expires_at, day(11));
        }
    }

    #[test]
    fn test_ensure_today_keeps_current_set() {
        let mut profile = profile_on(10);
        update_progress(DEFAULT_TASKS, &mut profile, "browse", 2).unwrap();
        assert!(!ensure_today(DEFAULT_TASKS, &mut profile, day(10)));
        assert_eq!(profile.task("browse").unwrap().progress, 2);
    }

    #[test]
    fn test_ensure_today_resets_stale_set() {
        let mut profile = profile_on(10);
        update_progress(DEFAULT_TASKS, &mut profile, "browse", 2).unwrap();
        update_progress(DEFAULT_TASKS, &mut profile, "login", 1).unwrap();

        // Next day: everything starts over
        assert!(ensure_today(DEFAULT_TASKS, &mut profile, day(11)));
        assert_eq!(profile.daily_tasks.len(), DEFAULT_TASKS.len());
        assert!(profile
            .daily_tasks
            .iter()
            .all(|t| t.progress == 0 && !t.completed && t.expires_at == day(12)));
        // Rewards already paid stay paid
        assert_eq!(profile.points, 10);
    }

    #[test]
    fn test_ensure_today_replaces_partial_stale_set() {
        let mut profile = GamificationProfile::new();
        profile.daily_tasks = vec![DailyTaskInstance {
            id: "login".to_string(),
            completed: true,
            progress: 1,
            expires_at: day(3),
        }];
        assert!(ensure_today(DEFAULT_TASKS, &mut profile, day(9)));
        assert_eq!(profile.daily_tasks.len(), DEFAULT_TASKS.len());
        assert!(!profile.task("login").unwrap().completed);
    }

    #[test]
    fn test_update_progress_completes_and_rewards() {
        let mut profile = profile_on(10);
        let task = update_progress(DEFAULT_TASKS, &mut profile, "favorite", 3).unwrap();
        assert!(task.completed);
        assert_eq!(task.progress, 3);
        assert_eq!(profile.points, 25);
        assert_eq!(profile.experience, 25);
        assert_eq!(profile.statistics.total_points_earned, 25);
        assert_eq!(profile.statistics.tasks_completed, 1);
    }

    #[test]
    fn test_update_progress_partial() {
        let mut profile = profile_on(10);
        let task = update_progress(DEFAULT_TASKS, &mut profile, "favorite", 2).unwrap();
        assert!(!task.completed);
        assert_eq!(task.progress, 2);
        assert_eq!(profile.points, 0);
        assert_eq!(profile.statistics.tasks_completed, 0);
    }

    #[test]
    fn test_update_progress_clamps_and_pays_once() {
        let mut profile = profile_on(10);
        let task = update_progress(DEFAULT_TASKS, &mut profile, "browse", 55).unwrap();
        assert_eq!(task.progress, 5);
        assert!(task.completed);

        let again = update_progress(DEFAULT_TASKS, &mut profile, "browse", 500).unwrap();
        assert_eq!(again.progress, 5);
        assert_eq!(profile.points, 15);
        assert_eq!(profile.statistics.tasks_completed, 1);

        // Lower value on a completed task does not regress it
        let lower = update_progress(DEFAULT_TASKS, &mut profile, "browse", 1).unwrap();
        assert_eq!(lower.progress, 5);
        assert!(lower.completed);
    }

    #[test]
    fn test_update_progress_unknown_task() {
        let mut profile = profile_on(10);
        let err = update_progress(DEFAULT_TASKS, &mut profile, "dance", 1).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_update_progress_rejects_negative() {
        let mut profile = profile_on(10);
        let err = update_progress(DEFAULT_TASKS, &mut profile, "browse", -1).unwrap_err();
        assert!(matches!(err, LoyaltyError::Validation(_)));
        assert_eq!(profile.task("browse").unwrap().progress, 0);
    }

    #[test]
    fn test_advance_task_steps_and_skips_missing() {
        let mut profile = profile_on(10);
        advance_task(DEFAULT_TASKS, &mut profile, "favorite", 1);
        advance_task(DEFAULT_TASKS, &mut profile, "favorite", 1);
        let task = advance_task(DEFAULT_TASKS, &mut profile, "favorite", 1).unwrap();
        assert!(task.completed);
        assert_eq!(profile.points, 25);

        assert!(advance_task(DEFAULT_TASKS, &mut profile, "dance", 1).is_none());
        assert!(advance_task(&[], &mut profile, "login", 1).is_none());
    }
}
