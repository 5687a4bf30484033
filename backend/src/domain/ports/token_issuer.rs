//! Driven port for bearer token issuance.

use crate::domain::{IssuedToken, UserAccount};

use super::define_port_error;

define_port_error! {
    /// Failures raised while producing an access token.
    pub enum TokenIssuerError {
        /// Signing the token failed.
        Signing { message: String } => "token signing failed: {message}",
    }
}

/// Issues stateless signed tokens. Nothing is stored server side.
#[cfg_attr(test, mockall::automock)]
pub trait TokenIssuer: Send + Sync {
    /// Produce a fresh token for `account`.
    fn issue(&self, account: &UserAccount) -> Result<IssuedToken, TokenIssuerError>;
}
