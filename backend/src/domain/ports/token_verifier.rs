//! Driven port for bearer token verification.

use crate::domain::AuthenticatedUser;

use super::define_port_error;

define_port_error! {
    /// Reasons a presented access token is refused.
    pub enum TokenVerifierError {
        /// Bad signature, wrong issuer or malformed claims.
        Invalid { message: String } => "access token rejected: {message}",
        /// The `exp` claim lies in the past.
        Expired => "access token expired",
    }
}

/// Checks tokens produced by a [`super::TokenIssuer`].
#[cfg_attr(test, mockall::automock)]
pub trait TokenVerifier: Send + Sync {
    /// Return the caller identity carried by `token`.
    fn verify(&self, token: &str) -> Result<AuthenticatedUser, TokenVerifierError>;
}
