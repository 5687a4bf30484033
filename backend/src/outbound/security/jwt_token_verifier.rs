//! HS256 JWT implementation of the `TokenVerifier` port.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use super::{AccessClaims, SigningSecret};
use crate::domain::ports::{TokenVerifier, TokenVerifierError};
use crate::domain::{AuthenticatedUser, UserId};

/// Verifies access tokens signed by [`super::JwtTokenIssuer`].
///
/// Tokens must carry the configured issuer and an unexpired `exp`; no
/// leeway is granted.
pub struct JwtTokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl JwtTokenVerifier {
    /// Create a verifier sharing the issuer's secret.
    ///
    /// # Examples
    /// ```
    /// use survey_backend::outbound::security::{JwtTokenVerifier, SigningSecret};
    ///
    /// let secret = SigningSecret::from_bytes(vec![7_u8; 32]);
    /// let _verifier = JwtTokenVerifier::new(&secret, "survey-backend");
    /// ```
    pub fn new(secret: &SigningSecret, issuer: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[issuer]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        validation.leeway = 0;
        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }
}

impl TokenVerifier for JwtTokenVerifier {
    fn verify(&self, token: &str) -> Result<AuthenticatedUser, TokenVerifierError> {
        let data = decode::<AccessClaims>(token, &self.key, &self.validation).map_err(|err| {
            match err.kind() {
                ErrorKind::ExpiredSignature => TokenVerifierError::expired(),
                _ => TokenVerifierError::invalid(err.to_string()),
            }
        })?;
        let claims = data.claims;
        let id = claims
            .sub
            .parse::<i64>()
            .ok()
            .and_then(|raw| UserId::new(raw).ok())
            .ok_or_else(|| TokenVerifierError::invalid("subject is not an account id"))?;
        Ok(AuthenticatedUser::new(id, claims.email))
    }
}
