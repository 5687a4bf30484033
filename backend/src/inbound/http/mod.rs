//! HTTP inbound adapter exposing REST endpoints.

pub mod accounts;
pub mod bearer;
pub mod error;
pub mod state;
pub mod survey;
#[cfg(test)]
pub mod test_utils;

use actix_web::web;

use crate::domain::Error;

pub use error::ApiResult;

/// JSON extractor settings shared by every handler.
///
/// Body parse failures use the standard error envelope instead of Actix's
/// plain-text default.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        Error::invalid_request(format!("invalid JSON payload: {err}")).into()
    })
}

/// Register every `/api/v1` handler on the given scope.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use survey_backend::inbound::http::configure;
///
/// let _app = App::new().service(web::scope("/api/v1").configure(configure));
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(accounts::sign_in)
        .service(accounts::register)
        .service(survey::ask_question)
        .service(survey::upload_questionnaire);
}
