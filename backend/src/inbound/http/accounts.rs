//! Account API handlers.
//!
//! ```text
//! POST /api/v1/accounts/sign-in {"email":"test@example.com","password":"password"}
//! POST /api/v1/accounts/register {"email":"...","password":"...","fullName":"..."}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{
    Error, LoginCredentials, LoginValidationError, Registration, RegistrationValidationError,
    SessionToken, UserValidationError,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Sign-in request body for `POST /api/v1/accounts/sign-in`.
///
/// Missing fields deserialize as empty strings so they fail validation with
/// a field-level error rather than a generic parse failure.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignInRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl TryFrom<SignInRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: SignInRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.email, &value.password)
    }
}

/// Token returned by a successful sign-in.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignInResponse {
    #[schema(example = "Bearer")]
    pub token_type: String,
    pub access_token: String,
    pub user_name: String,
    /// Seconds until `accessToken` expires.
    pub expires_in: u64,
}

impl From<SessionToken> for SignInResponse {
    fn from(value: SessionToken) -> Self {
        Self {
            token_type: value.token_type().to_owned(),
            access_token: value.access_token().to_owned(),
            user_name: value.user_name().to_owned(),
            expires_in: value.expires_in(),
        }
    }
}

/// Registration request body for `POST /api/v1/accounts/register`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub full_name: String,
}

impl TryFrom<RegisterRequest> for Registration {
    type Error = RegistrationValidationError;

    fn try_from(value: RegisterRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.email, &value.password, &value.full_name)
    }
}

/// Exchange email and password for a bearer token.
#[utoipa::path(
    post,
    path = "/api/v1/accounts/sign-in",
    request_body = SignInRequest,
    responses(
        (status = 200, description = "Signed in", body = SignInResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "signIn",
    security([])
)]
#[post("/accounts/sign-in")]
pub async fn sign_in(
    state: web::Data<HttpState>,
    payload: web::Json<SignInRequest>,
) -> ApiResult<web::Json<SignInResponse>> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;
    let session = state.login.sign_in(&credentials).await?;
    Ok(web::Json(SignInResponse::from(session)))
}

/// Create a new account.
#[utoipa::path(
    post,
    path = "/api/v1/accounts/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Account created"),
        (status = 400, description = "Invalid request or email already registered", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "register",
    security([])
)]
#[post("/accounts/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let registration = Registration::try_from(payload.into_inner())
        .map_err(map_registration_validation_error)?;
    state.registration.register(&registration).await?;
    Ok(HttpResponse::Ok().finish())
}

fn field_error(message: impl Into<String>, field: &str, code: &str) -> Error {
    Error::invalid_request(message).with_details(json!({ "field": field, "code": code }))
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyEmail => {
            field_error("email must not be empty", "email", "empty_email")
        }
        LoginValidationError::EmptyPassword => {
            field_error("password must not be empty", "password", "empty_password")
        }
    }
}

fn map_registration_validation_error(err: RegistrationValidationError) -> Error {
    let message = err.to_string();
    match err {
        RegistrationValidationError::Email(UserValidationError::EmptyEmail) => {
            field_error(message, "email", "empty_email")
        }
        RegistrationValidationError::Email(_) => field_error(message, "email", "invalid_email"),
        RegistrationValidationError::EmptyPassword => {
            field_error(message, "password", "empty_password")
        }
        RegistrationValidationError::DisplayName(UserValidationError::DisplayNameTooLong {
            max,
        }) => Error::invalid_request(message).with_details(json!({
            "field": "fullName",
            "code": "full_name_too_long",
            "max": max,
        })),
        RegistrationValidationError::DisplayName(_) => {
            field_error(message, "fullName", "empty_full_name")
        }
    }
}

#[cfg(test)]
#[path = "accounts_tests.rs"]
mod tests;
