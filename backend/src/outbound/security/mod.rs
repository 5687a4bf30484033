//! Credential adapters: password hashing, token signing and verification,
//! plus the signing secret they share.

mod argon2_password_hasher;
mod jwt_token_issuer;
mod jwt_token_verifier;
pub mod signing_secret;

pub use argon2_password_hasher::Argon2PasswordHasher;
pub use jwt_token_issuer::{AccessClaims, JwtTokenIssuer};
pub use jwt_token_verifier::JwtTokenVerifier;
pub use signing_secret::{BuildMode, SigningSecret, SigningSecretError};
