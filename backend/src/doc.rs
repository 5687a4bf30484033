//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: account and survey endpoints from the inbound layer
//! - **Schemas**: request and response bodies plus the error envelope
//! - **Security**: bearer access tokens issued by the sign-in endpoint
//!
//! The generated specification is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::accounts::{RegisterRequest, SignInRequest, SignInResponse};
use crate::inbound::http::survey::{
    AnswerResponse, QuestionRequest, QuestionnaireUpload, UploadResponse,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BearerToken",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some(
                        "Access token issued by POST /api/v1/accounts/sign-in.",
                    ))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Survey backend API",
        description = "Account registration, token sign-in, survey question relay and questionnaire uploads."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::accounts::sign_in,
        crate::inbound::http::accounts::register,
        crate::inbound::http::survey::ask_question,
        crate::inbound::http::survey::upload_questionnaire,
    ),
    components(schemas(
        SignInRequest,
        SignInResponse,
        RegisterRequest,
        QuestionRequest,
        AnswerResponse,
        QuestionnaireUpload,
        UploadResponse,
        Error,
        ErrorCode
    )),
    tags(
        (name = "accounts", description = "Registration and sign-in"),
        (name = "survey", description = "Survey questions and questionnaire uploads")
    )
)]
pub struct ApiDoc;
