//! Driven port for account persistence and its errors.
//!
//! The store is the source of truth for email uniqueness: `insert` must
//! reject a duplicate even if an earlier `exists_by_email` check passed.

use async_trait::async_trait;

use crate::domain::{EmailAddress, NewUserAccount, UserAccount, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// An account with this email already exists.
        DuplicateEmail { email: String } => "user with email {email} already exists",
    }
}

/// Account store used by sign-in and registration.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch an account by exact email match.
    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, UserPersistenceError>;

    /// Fetch an account by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<UserAccount>, UserPersistenceError>;

    /// Report whether an account already uses `email`.
    async fn exists_by_email(&self, email: &EmailAddress) -> Result<bool, UserPersistenceError>;

    /// Persist a new account, assigning its identifier.
    async fn insert(&self, account: NewUserAccount) -> Result<UserAccount, UserPersistenceError>;
}
