//! Process-local `UserRepository` adapter.
//!
//! Accounts live in a mutex-guarded map keyed by email. The uniqueness check
//! and the insert happen under one guard, so concurrent registrations for the
//! same address cannot both succeed.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{EmailAddress, NewUserAccount, UserAccount, UserId};

#[derive(Debug, Default)]
struct Store {
    by_email: HashMap<String, UserAccount>,
    last_id: i64,
}

/// In-memory account store with monotonically increasing ids starting at 1.
///
/// # Examples
/// ```
/// use survey_backend::outbound::persistence::InMemoryUserRepository;
///
/// let repo = InMemoryUserRepository::default();
/// assert_eq!(repo.len(), 0);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    store: Mutex<Store>,
}

impl InMemoryUserRepository {
    fn lock(&self) -> Result<MutexGuard<'_, Store>, UserPersistenceError> {
        self.store
            .lock()
            .map_err(|_| UserPersistenceError::connection("user store lock poisoned"))
    }

    /// Number of stored accounts. A poisoned store reports zero.
    pub fn len(&self) -> usize {
        self.lock().map(|store| store.by_email.len()).unwrap_or(0)
    }

    /// Whether the store holds no accounts.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, UserPersistenceError> {
        let store = self.lock()?;
        Ok(store.by_email.get(email).cloned())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<UserAccount>, UserPersistenceError> {
        let store = self.lock()?;
        Ok(store
            .by_email
            .values()
            .find(|account| account.id() == id)
            .cloned())
    }

    async fn exists_by_email(&self, email: &EmailAddress) -> Result<bool, UserPersistenceError> {
        let store = self.lock()?;
        Ok(store.by_email.contains_key(email.as_ref()))
    }

    async fn insert(&self, account: NewUserAccount) -> Result<UserAccount, UserPersistenceError> {
        let mut store = self.lock()?;
        let key = account.email.as_ref().to_owned();
        if store.by_email.contains_key(&key) {
            return Err(UserPersistenceError::duplicate_email(key));
        }
        let next = store
            .last_id
            .checked_add(1)
            .ok_or_else(|| UserPersistenceError::query("user id space exhausted"))?;
        let id = UserId::new(next).map_err(|err| UserPersistenceError::query(err.to_string()))?;
        let stored = UserAccount::from_new(id, account);
        store.last_id = next;
        store.by_email.insert(key, stored.clone());
        Ok(stored)
    }
}
