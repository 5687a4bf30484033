//! Driving port for sign-in.
//!
//! Inbound adapters call it to exchange credentials for a bearer token
//! without knowing how accounts are stored or tokens are signed.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, SessionToken};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Verify credentials and issue a token.
    ///
    /// Unknown emails and wrong passwords both fail with the same
    /// `unauthorized` error.
    async fn sign_in(&self, credentials: &LoginCredentials) -> Result<SessionToken, Error>;
}
