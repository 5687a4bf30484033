//! Driving port for account registration.

use async_trait::async_trait;

use crate::domain::{Error, Registration, UserAccount};

/// Domain use-case port for creating accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationService: Send + Sync {
    /// Create an account, rejecting emails that are already registered.
    async fn register(&self, registration: &Registration) -> Result<UserAccount, Error>;
}
