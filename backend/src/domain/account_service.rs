//! Account domain service.
//!
//! Implements the sign-in and registration driving ports over a user
//! repository, a password hasher, and a token issuer.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{
    LoginService, PasswordHasher, PasswordHasherError, RegistrationService, TokenIssuer,
    UserPersistenceError, UserRepository,
};
use crate::domain::{
    EmailAddress, Error, LoginCredentials, NewUserAccount, PasswordHash, Registration,
    SessionToken, UserAccount,
};

/// Message returned for every failed sign-in, whatever the cause.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "invalid credentials";

/// Well-formed Argon2id hash that matches no password.
///
/// Sign-in verifies against it when the email is unknown so both failure
/// paths pay for one hash with the default cost parameters.
pub const UNKNOWN_ACCOUNT_PASSWORD_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$jADH9SN5vKrQ8GMXbtdU5g$Pv4T5fmEHTVcq4OJQGHZX7TIqCK0T4zk1yxg8uMuZTg";

/// Account service implementing [`LoginService`] and [`RegistrationService`].
#[derive(Clone)]
pub struct AccountService<R, H, T> {
    users: Arc<R>,
    hasher: Arc<H>,
    tokens: Arc<T>,
}

impl<R, H, T> AccountService<R, H, T> {
    /// Create a new service over the given adapters.
    pub fn new(users: Arc<R>, hasher: Arc<H>, tokens: Arc<T>) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }
}

fn duplicate_email(email: &str) -> Error {
    Error::conflict(format!("User with email {email} already exist"))
}

fn map_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateEmail { email } => duplicate_email(&email),
    }
}

fn map_hasher_error(error: PasswordHasherError) -> Error {
    Error::internal(error.to_string())
}

#[async_trait]
impl<R, H, T> LoginService for AccountService<R, H, T>
where
    R: UserRepository,
    H: PasswordHasher,
    T: TokenIssuer,
{
    async fn sign_in(&self, credentials: &LoginCredentials) -> Result<SessionToken, Error> {
        let Some(account) = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(map_persistence_error)?
        else {
            self.verify_placeholder(credentials.password()).await;
            debug!("sign-in rejected: unknown email");
            return Err(Error::unauthorized(INVALID_CREDENTIALS_MESSAGE));
        };

        let matches = self
            .hasher
            .verify(credentials.password(), account.password_hash())
            .await
            .map_err(map_hasher_error)?;
        if !matches {
            debug!(user_id = %account.id(), "sign-in rejected: password mismatch");
            return Err(Error::unauthorized(INVALID_CREDENTIALS_MESSAGE));
        }

        let issued = self
            .tokens
            .issue(&account)
            .map_err(|err| Error::internal(err.to_string()))?;
        let session = SessionToken::new(issued, account.display_name())
            .ok_or_else(|| Error::internal("token issuer returned an empty token"))?;
        info!(user_id = %account.id(), "user signed in");
        Ok(session)
    }
}

impl<R, H, T> AccountService<R, H, T>
where
    H: PasswordHasher,
{
    /// Spend one verification on [`UNKNOWN_ACCOUNT_PASSWORD_HASH`]. The
    /// outcome is discarded.
    async fn verify_placeholder(&self, password: &str) {
        let placeholder = PasswordHash::from_static(UNKNOWN_ACCOUNT_PASSWORD_HASH);
        if let Err(err) = self.hasher.verify(password, &placeholder).await {
            debug!(error = %err, "placeholder verification failed");
        }
    }
}

impl<R, H, T> AccountService<R, H, T>
where
    R: UserRepository,
    H: PasswordHasher,
{
    async fn ensure_email_free(&self, email: &EmailAddress) -> Result<(), Error> {
        let taken = self
            .users
            .exists_by_email(email)
            .await
            .map_err(map_persistence_error)?;
        if taken {
            return Err(duplicate_email(email.as_ref()));
        }
        Ok(())
    }
}

#[async_trait]
impl<R, H, T> RegistrationService for AccountService<R, H, T>
where
    R: UserRepository,
    H: PasswordHasher,
    T: Send + Sync,
{
    async fn register(&self, registration: &Registration) -> Result<UserAccount, Error> {
        // `insert` enforces uniqueness again under the store lock.
        self.ensure_email_free(registration.email()).await?;

        let password_hash = self
            .hasher
            .hash(registration.password())
            .await
            .map_err(map_hasher_error)?;
        let account = self
            .users
            .insert(NewUserAccount {
                email: registration.email().clone(),
                display_name: registration.display_name().clone(),
                password_hash,
            })
            .await
            .map_err(map_persistence_error)?;
        info!(user_id = %account.id(), "account registered");
        Ok(account)
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
