//! Bearer token guard for protected handlers.
//!
//! Handlers that take a [`BearerAuth`] argument only run once the
//! `Authorization: Bearer <token>` header carries a token accepted by the
//! configured [`crate::domain::ports::TokenVerifier`].

use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::{Ready, ready};
use tracing::debug;

use crate::domain::ports::TokenVerifierError;
use crate::domain::{AuthenticatedUser, BEARER_TOKEN_TYPE, Error};
use crate::inbound::http::state::HttpState;

pub(crate) const MISSING_TOKEN_MESSAGE: &str = "bearer token required";
pub(crate) const INVALID_TOKEN_MESSAGE: &str = "invalid access token";
pub(crate) const EXPIRED_TOKEN_MESSAGE: &str = "access token expired";

/// Caller identity extracted from a verified bearer token.
#[derive(Debug, Clone)]
pub struct BearerAuth(pub AuthenticatedUser);

impl BearerAuth {
    /// The verified caller.
    pub fn user(&self) -> &AuthenticatedUser {
        &self.0
    }
}

/// Pull the token out of an `Authorization` header value. The scheme is
/// matched case-insensitively.
fn bearer_token(req: &HttpRequest) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case(BEARER_TOKEN_TYPE) && !token.is_empty()).then_some(token)
}

fn authenticate(req: &HttpRequest) -> Result<BearerAuth, Error> {
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| Error::internal("HTTP state is not registered"))?;
    let token = bearer_token(req).ok_or_else(|| Error::unauthorized(MISSING_TOKEN_MESSAGE))?;
    match state.access_tokens.verify(token) {
        Ok(user) => Ok(BearerAuth(user)),
        Err(TokenVerifierError::Expired) => Err(Error::unauthorized(EXPIRED_TOKEN_MESSAGE)),
        Err(err) => {
            debug!(error = %err, "access token rejected");
            Err(Error::unauthorized(INVALID_TOKEN_MESSAGE))
        }
    }
}

impl FromRequest for BearerAuth {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req).map_err(actix_web::Error::from))
    }
}
