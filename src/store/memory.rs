use super::UserStore;
use crate::core::error::{LoyaltyError, Result};
use crate::profile::UserRecord;
use parking_lot::RwLock;
use std::collections::HashMap;
use uuid::Uuid;

/// Process-local store, used by tests and embedders that persist elsewhere.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<Uuid, UserRecord>>,
}

impl MemoryUserStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: impl IntoIterator<Item = UserRecord>) -> Self {
        Self {
            users: RwLock::new(users.into_iter().map(|u| (u.id, u)).collect()),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.users.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.read().is_empty()
    }
}

impl UserStore for MemoryUserStore {
    fn load(&self, id: Uuid) -> Result<UserRecord> {
        self.users
            .read()
            .get(&id)
            .cloned()
            .ok_or_else(|| LoyaltyError::not_found("user", id.to_string()))
    }

    fn save(&self, record: &UserRecord) -> Result<()> {
        self.users.write().insert(record.id, record.clone());
        Ok(())
    }

    fn list(&self) -> Result<Vec<UserRecord>> {
        Ok(self.users.read().values().cloned().collect())
    }
}
