//! HS256 JWT implementation of the `TokenIssuer` port.

use std::sync::Arc;
use std::time::Duration;

use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use mockable::Clock;
use serde::{Deserialize, Serialize};

use super::SigningSecret;
use crate::domain::ports::{TokenIssuer, TokenIssuerError};
use crate::domain::{IssuedToken, UserAccount};

/// Claims carried by every access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Account identifier.
    pub sub: String,
    /// Registered email address.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Issuing service, checked on verification.
    pub iss: String,
    /// Issued-at, seconds since the Unix epoch.
    pub iat: i64,
    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
}

/// Signs stateless access tokens with a shared secret.
pub struct JwtTokenIssuer {
    key: EncodingKey,
    issuer: String,
    ttl_seconds: u64,
    clock: Arc<dyn Clock>,
}

impl JwtTokenIssuer {
    /// Create an issuer. A zero `ttl` is raised to one second.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use std::time::Duration;
    ///
    /// use mockable::DefaultClock;
    /// use survey_backend::outbound::security::{JwtTokenIssuer, SigningSecret};
    ///
    /// let secret = SigningSecret::from_bytes(vec![7_u8; 32]);
    /// let issuer = JwtTokenIssuer::new(
    ///     &secret,
    ///     "survey-backend",
    ///     Duration::from_secs(3600),
    ///     Arc::new(DefaultClock),
    /// );
    /// assert_eq!(issuer.ttl_seconds(), 3600);
    /// ```
    pub fn new(
        secret: &SigningSecret,
        issuer: impl Into<String>,
        ttl: Duration,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            key: EncodingKey::from_secret(secret.as_bytes()),
            issuer: issuer.into(),
            ttl_seconds: ttl.as_secs().max(1),
            clock,
        }
    }

    /// Token lifetime in seconds.
    pub fn ttl_seconds(&self) -> u64 {
        self.ttl_seconds
    }

    fn claims_for(&self, account: &UserAccount) -> AccessClaims {
        let iat = self.clock.utc().timestamp();
        let ttl = i64::try_from(self.ttl_seconds).unwrap_or(i64::MAX);
        AccessClaims {
            sub: account.id().to_string(),
            email: account.email().to_string(),
            name: account.display_name().to_string(),
            iss: self.issuer.clone(),
            iat,
            exp: iat.saturating_add(ttl),
        }
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, account: &UserAccount) -> Result<IssuedToken, TokenIssuerError> {
        let claims = self.claims_for(account);
        let access_token = encode(&Header::new(Algorithm::HS256), &claims, &self.key)
            .map_err(|error| TokenIssuerError::signing(error.to_string()))?;
        Ok(IssuedToken {
            access_token,
            expires_in: self.ttl_seconds,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use jsonwebtoken::{DecodingKey, Validation, decode};
    use mockable::MockClock;
    use rstest::{fixture, rstest};

    use crate::domain::{DisplayName, EmailAddress, NewUserAccount, PasswordHash, UserId};

    const SECRET: &[u8] = b"0123456789abcdef0123456789abcdef";
    const ISSUED_AT: i64 = 1_700_000_000;

    #[fixture]
    fn account() -> UserAccount {
        UserAccount::from_new(
            UserId::new(42).expect("positive id"),
            NewUserAccount {
                email: EmailAddress::new("test@example.com").expect("valid email"),
                display_name: DisplayName::new("Test User").expect("valid name"),
                password_hash: PasswordHash::new("$argon2id$hash").expect("hash"),
            },
        )
    }

    fn fixed_clock() -> Arc<dyn Clock> {
        let mut clock = MockClock::new();
        let now = Utc
            .timestamp_opt(ISSUED_AT, 0)
            .single()
            .expect("valid timestamp");
        clock.expect_utc().return_const(now);
        Arc::new(clock)
    }

    fn decode_claims(token: &str, secret: &[u8]) -> jsonwebtoken::errors::Result<AccessClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&["survey-backend"]);
        // The fixed clock is in the past.
        validation.validate_exp = false;
        decode::<AccessClaims>(token, &DecodingKey::from_secret(secret), &validation)
            .map(|data| data.claims)
    }

    #[rstest]
    fn issued_token_carries_account_claims(account: UserAccount) {
        let issuer = JwtTokenIssuer::new(
            &SigningSecret::from_bytes(SECRET),
            "survey-backend",
            Duration::from_secs(3600),
            fixed_clock(),
        );

        let token = issuer.issue(&account).expect("token signs");
        assert_eq!(token.expires_in, 3600);

        let claims = decode_claims(&token.access_token, SECRET).expect("token decodes");
        assert_eq!(
            claims,
            AccessClaims {
                sub: "42".to_owned(),
                email: "test@example.com".to_owned(),
                name: "Test User".to_owned(),
                iss: "survey-backend".to_owned(),
                iat: ISSUED_AT,
                exp: ISSUED_AT + 3600,
            }
        );
    }

    #[rstest]
    fn token_does_not_verify_with_other_secret(account: UserAccount) {
        let issuer = JwtTokenIssuer::new(
            &SigningSecret::from_bytes(SECRET),
            "survey-backend",
            Duration::from_secs(60),
            fixed_clock(),
        );
        let token = issuer.issue(&account).expect("token signs");
        assert!(decode_claims(&token.access_token, b"another-secret-another-secret!!").is_err());
    }

    #[rstest]
    fn zero_ttl_is_raised_to_one_second() {
        let issuer = JwtTokenIssuer::new(
            &SigningSecret::from_bytes(SECRET),
            "survey-backend",
            Duration::ZERO,
            fixed_clock(),
        );
        assert_eq!(issuer.ttl_seconds(), 1);
    }
}
