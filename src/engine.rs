//! Transport-independent API over the profile logic.
//!
//! Each mutating call is one read-modify-write of a single user's record,
//! serialized per user. The stored record is only replaced after the whole
//! mutation succeeded, and notifications go out after the save.

use crate::badges::{badge_catalog_status, BadgeStatus, EarnedBadge};
use crate::catalog::Catalog;
use crate::config::EngineConfig;
use crate::core::clock::{Clock, SystemClock};
use crate::core::error::{LoyaltyError, Result};
use crate::levels::LevelName;
use crate::notify::{NotificationKind, Notifier};
use crate::profile::{
    self, LoginOutcome, PointsOutcome, ProfileView, PurchaseOutcome, RankedEntry, RewardRules,
    StatisticsSnapshot, UserRecord,
};
use crate::store::UserStore;
use crate::tasks::{self, DailyTaskInstance};
use dashmap::DashMap;
use parking_lot::Mutex;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

pub struct LoyaltyEngine<S: UserStore> {
    store: S,
    catalog: Arc<Catalog>,
    clock: Arc<dyn Clock>,
    notifier: Option<Arc<dyn Notifier>>,
    rules: RewardRules,
    leaderboard_limit: usize,
    locks: DashMap<Uuid, Arc<Mutex<()>>>,
}

impl<S: UserStore> LoyaltyEngine<S> {
    /// Engine over `store` with the system clock, default rules and no notifier.
    pub fn new(store: S, catalog: Arc<Catalog>) -> Self {
        Self {
            store,
            catalog,
            clock: Arc::new(SystemClock),
            notifier: None,
            rules: RewardRules::default(),
            leaderboard_limit: crate::core::constants::DEFAULT_LEADERBOARD_LIMIT,
            locks: DashMap::new(),
        }
    }

    /// Engine configured from `config` (catalog file, reward rules, limits).
    pub fn from_config(store: S, config: &EngineConfig) -> Result<Self> {
        config.validate()?;
        let catalog = Arc::new(config.load_catalog()?);
        Ok(Self::new(store, catalog)
            .with_rules(config.reward_rules())
            .with_leaderboard_limit(config.leaderboard_limit))
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn with_rules(mut self, rules: RewardRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_leaderboard_limit(mut self, limit: usize) -> Self {
        self.leaderboard_limit = limit;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // =========================================================================
    // Users
    // =========================================================================

    /// Create a user with a zeroed profile and today's tasks.
    pub fn create_user(&self, username: &str, email: &str) -> Result<UserRecord> {
        let username = username.trim();
        if username.is_empty() {
            return Err(LoyaltyError::validation("username must not be empty"));
        }
        let mut record = UserRecord::new(username, email.trim());
        tasks::ensure_today(
            self.catalog.tasks(),
            &mut record.profile,
            self.clock.today(),
        );
        self.store.save(&record)?;
        tracing::info!(user_id = %record.id, username = %record.username, "User created");
        Ok(record)
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Current profile view. Saves only if the daily tasks rolled over.
    pub fn get_profile_view(&self, user_id: Uuid) -> Result<ProfileView> {
        self.with_user_locked(user_id, || {
            let mut record = self.store.load(user_id)?;
            let before = record.profile.clone();
            let view = profile::get_view(&self.catalog, &mut record.profile, self.clock.now());
            if record.profile != before {
                self.store.save(&record)?;
            }
            Ok(view)
        })
    }

    pub fn get_badge_catalog_status(&self, user_id: Uuid) -> Result<Vec<BadgeStatus>> {
        let record = self.store.load(user_id)?;
        Ok(badge_catalog_status(self.catalog.badges(), &record.profile))
    }

    /// Snapshot ranking; `None` uses the configured limit.
    pub fn get_leaderboard(&self, limit: Option<usize>) -> Result<Vec<RankedEntry>> {
        let users = self.store.list()?;
        let limit = limit.unwrap_or(self.leaderboard_limit);
        Ok(profile::leaderboard(&self.catalog, &users, limit))
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    pub fn grant_points(&self, user_id: Uuid, amount: i64, reason: &str) -> Result<PointsOutcome> {
        let now = self.clock.now();
        let (email, outcome) = self.mutate(user_id, |record| {
            profile::add_points(&self.catalog, &mut record.profile, amount, reason, now)
        })?;
        self.dispatch(&email, outcome.level_up, outcome.level, &outcome.new_badges);
        Ok(outcome)
    }

    pub fn record_login(&self, user_id: Uuid) -> Result<LoginOutcome> {
        let now = self.clock.now();
        let (email, outcome) = self.mutate(user_id, |record| {
            Ok(profile::record_login(
                &self.catalog,
                &mut record.profile,
                &self.rules,
                now,
            ))
        })?;
        self.dispatch(&email, outcome.level_up, outcome.level, &outcome.new_badges);
        Ok(outcome)
    }

    pub fn update_task_progress(
        &self,
        user_id: Uuid,
        task_id: &str,
        progress: i64,
    ) -> Result<DailyTaskInstance> {
        let now = self.clock.now();
        let (email, outcome) = self.mutate(user_id, |record| {
            profile::update_task_progress(&self.catalog, &mut record.profile, task_id, progress, now)
        })?;
        self.dispatch(&email, outcome.level_up, outcome.level, &outcome.new_badges);
        Ok(outcome.task)
    }

    pub fn record_purchase(&self, user_id: Uuid, amount: f64) -> Result<PurchaseOutcome> {
        let now = self.clock.now();
        let (email, outcome) = self.mutate(user_id, |record| {
            profile::record_purchase(&self.catalog, &mut record.profile, &self.rules, amount, now)
        })?;
        self.dispatch(&email, outcome.level_up, outcome.level, &outcome.new_badges);
        Ok(outcome)
    }

    pub fn record_favorite(&self, user_id: Uuid, added: bool) -> Result<PointsOutcome> {
        let now = self.clock.now();
        let (email, outcome) = self.mutate(user_id, |record| {
            Ok(profile::record_favorite(
                &self.catalog,
                &mut record.profile,
                added,
                now,
            ))
        })?;
        self.dispatch(&email, outcome.level_up, outcome.level, &outcome.new_badges);
        Ok(outcome)
    }

    pub fn sync_statistics(
        &self,
        user_id: Uuid,
        snapshot: &StatisticsSnapshot,
    ) -> Result<Vec<EarnedBadge>> {
        let now = self.clock.now();
        let (email, new_badges) = self.mutate(user_id, |record| {
            profile::sync_statistics(&self.catalog, &mut record.profile, snapshot, now)
        })?;
        self.dispatch(&email, false, LevelName::default(), &new_badges);
        Ok(new_badges)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Run `f` holding this user's in-process mutex and the store's record lock.
    ///
    /// The mutex entry is dropped from the map once no other caller holds it,
    /// so lookups of unknown ids leave nothing behind.
    fn with_user_locked<T>(&self, user_id: Uuid, f: impl FnOnce() -> Result<T>) -> Result<T> {
        let lock = Arc::clone(&self.locks.entry(user_id).or_default());
        let result = {
            let _guard = lock.lock();
            self.store.lock_record(user_id).and_then(|_record_lock| f())
        };
        drop(lock);
        self.locks
            .remove_if(&user_id, |_, entry| Arc::strong_count(entry) == 1);
        result
    }

    /// Load, mutate a working copy, save. Nothing is written if `f` fails.
    fn mutate<T>(
        &self,
        user_id: Uuid,
        f: impl FnOnce(&mut UserRecord) -> Result<T>,
    ) -> Result<(String, T)> {
        self.with_user_locked(user_id, || {
            let mut record = self.store.load(user_id)?;
            let value = f(&mut record)?;
            self.store.save(&record)?;
            Ok((record.email, value))
        })
    }

    /// Fire level-up and badge notifications. Failures are logged only.
    fn dispatch(&self, email: &str, level_up: bool, level: LevelName, new_badges: &[EarnedBadge]) {
        let Some(notifier) = &self.notifier else {
            return;
        };

        if level_up {
            let payload = json!({ "level": level });
            if let Err(e) = notifier.notify(email, NotificationKind::LevelUp, &payload) {
                tracing::warn!(%email, error = %e, "Level-up notification failed");
            }
        }

        for badge in new_badges {
            let payload = json!({ "badge": badge });
            if let Err(e) = notifier.notify(email, NotificationKind::BadgeEarned, &payload) {
                tracing::warn!(%email, badge = %badge.id, error = %e, "Badge notification failed");
            }
        }
    }
}
