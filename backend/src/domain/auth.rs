//! Authentication primitives: sign-in credentials, registration requests, and
//! issued session tokens.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use zeroize::Zeroizing;

use super::user::{DisplayName, EmailAddress, UserId, UserValidationError};

/// Token type label returned with every issued access token.
pub const BEARER_TOKEN_TYPE: &str = "Bearer";

/// Domain error returned when sign-in payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    /// Email was missing or blank once trimmed.
    #[error("email must not be empty")]
    EmptyEmail,
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Validated sign-in credentials.
///
/// ## Invariants
/// - `email` is trimmed and non-empty. It is not syntax-checked: an address
///   that cannot exist simply fails to match a stored account.
/// - `password` is non-empty and retains caller-provided whitespace.
///
/// # Examples
/// ```
/// use survey_backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("test@example.com", "password").unwrap();
/// assert_eq!(creds.email(), "test@example.com");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = email.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyEmail);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            email: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email used for the account lookup.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Plaintext password supplied by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl std::fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Domain error returned when a registration payload is invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationValidationError {
    /// Email was missing or malformed.
    #[error(transparent)]
    Email(UserValidationError),
    /// Display name was missing or too long.
    #[error(transparent)]
    DisplayName(UserValidationError),
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Validated registration request.
#[derive(Clone, PartialEq, Eq)]
pub struct Registration {
    email: EmailAddress,
    display_name: DisplayName,
    password: Zeroizing<String>,
}

impl Registration {
    /// Validate raw registration inputs.
    ///
    /// # Examples
    /// ```
    /// use survey_backend::domain::{Registration, RegistrationValidationError};
    ///
    /// let err = Registration::try_from_parts("bad", "pw", "Ada").unwrap_err();
    /// assert!(matches!(err, RegistrationValidationError::Email(_)));
    /// ```
    pub fn try_from_parts(
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<Self, RegistrationValidationError> {
        let email = EmailAddress::new(email).map_err(RegistrationValidationError::Email)?;
        if password.is_empty() {
            return Err(RegistrationValidationError::EmptyPassword);
        }
        let display_name =
            DisplayName::new(display_name).map_err(RegistrationValidationError::DisplayName)?;
        Ok(Self {
            email,
            display_name,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email the account will be registered under.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Display name for the new account.
    pub fn display_name(&self) -> &DisplayName {
        &self.display_name
    }

    /// Plaintext password to hash before persisting.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("email", &self.email)
            .field("display_name", &self.display_name)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Signed access token produced by a [`crate::domain::ports::TokenIssuer`].
#[derive(Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub access_token: String,
    /// Lifetime of the token in seconds.
    pub expires_in: u64,
}

impl std::fmt::Debug for IssuedToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IssuedToken")
            .field("access_token", &"<redacted>")
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

/// Result of a successful sign-in.
///
/// ## Invariants
/// - `access_token` is non-empty.
/// - `token_type` is always [`BEARER_TOKEN_TYPE`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken {
    access_token: String,
    user_name: String,
    expires_in: u64,
}

impl SessionToken {
    /// Pair an issued token with the account display name.
    ///
    /// Returns `None` when the issuer produced an empty token.
    pub fn new(token: IssuedToken, user_name: &DisplayName) -> Option<Self> {
        if token.access_token.is_empty() {
            return None;
        }
        Some(Self {
            access_token: token.access_token,
            user_name: user_name.as_ref().to_owned(),
            expires_in: token.expires_in,
        })
    }

    /// Token type label.
    pub fn token_type(&self) -> &'static str {
        BEARER_TOKEN_TYPE
    }

    /// Opaque bearer credential.
    pub fn access_token(&self) -> &str {
        self.access_token.as_str()
    }

    /// Display name of the signed-in account.
    pub fn user_name(&self) -> &str {
        self.user_name.as_str()
    }

    /// Seconds until the token expires.
    pub fn expires_in(&self) -> u64 {
        self.expires_in
    }
}

/// Caller identity recovered from a verified bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    id: UserId,
    email: String,
}

impl AuthenticatedUser {
    /// Identity for the account `id` registered under `email`.
    pub fn new(id: UserId, email: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
        }
    }

    /// Account identifier from the `sub` claim.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Email address from the `email` claim.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }
}
