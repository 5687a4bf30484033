//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use serde_json::Value;

use crate::Trace;
use crate::domain::ports::{
    MockLoginService, MockQuestionService, MockRegistrationService, MockTokenVerifier,
    MockUploadService,
};
use crate::domain::{AuthenticatedUser, UserId};
use crate::inbound::http::configure;
use crate::inbound::http::state::HttpState;

/// Token accepted by [`MockPorts::authorised`].
pub const TEST_TOKEN: &str = "test-token";
/// `Authorization` header value carrying [`TEST_TOKEN`].
pub const TEST_BEARER: &str = "Bearer test-token";

/// Mocked driving ports. Any port left without expectations panics when a
/// handler calls it.
pub struct MockPorts {
    pub login: MockLoginService,
    pub registration: MockRegistrationService,
    pub questions: MockQuestionService,
    pub uploads: MockUploadService,
    pub access_tokens: MockTokenVerifier,
    pub max_upload_bytes: usize,
}

impl Default for MockPorts {
    fn default() -> Self {
        Self {
            login: MockLoginService::new(),
            registration: MockRegistrationService::new(),
            questions: MockQuestionService::new(),
            uploads: MockUploadService::new(),
            access_tokens: MockTokenVerifier::new(),
            max_upload_bytes: 1024 * 1024,
        }
    }
}

impl MockPorts {
    /// Accept [`TEST_TOKEN`] as the token of account 1.
    pub fn authorised(mut self) -> Self {
        self.access_tokens
            .expect_verify()
            .withf(|token| token == TEST_TOKEN)
            .returning(|_| {
                let id = UserId::new(1).expect("positive id");
                Ok(AuthenticatedUser::new(id, "test@example.com"))
            });
        self
    }

    pub fn into_state(self) -> HttpState {
        HttpState {
            login: Arc::new(self.login),
            registration: Arc::new(self.registration),
            questions: Arc::new(self.questions),
            uploads: Arc::new(self.uploads),
            access_tokens: Arc::new(self.access_tokens),
            max_upload_bytes: self.max_upload_bytes,
        }
    }
}

/// Build an app with the production route table over the given mocks.
pub fn test_app(
    ports: MockPorts,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(ports.into_state()))
        .wrap(Trace)
        .service(web::scope("/api/v1").configure(configure))
}

/// Read a JSON string field from an error or success payload.
pub fn str_field<'a>(value: &'a Value, field: &str) -> Option<&'a str> {
    value.get(field).and_then(Value::as_str)
}
