//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    LoginService, QuestionService, RegistrationService, TokenVerifier, UploadService,
};

/// Dependency bundle for HTTP handlers.
///
/// # Examples
/// ```no_run
/// use std::sync::Arc;
///
/// use survey_backend::domain::ports::{
///     LoginService, QuestionService, RegistrationService, TokenVerifier, UploadService,
/// };
/// use survey_backend::inbound::http::state::HttpState;
///
/// fn wire(
///     login: Arc<dyn LoginService>,
///     registration: Arc<dyn RegistrationService>,
///     questions: Arc<dyn QuestionService>,
///     uploads: Arc<dyn UploadService>,
///     access_tokens: Arc<dyn TokenVerifier>,
/// ) -> HttpState {
///     HttpState {
///         login,
///         registration,
///         questions,
///         uploads,
///         access_tokens,
///         max_upload_bytes: 10 * 1024 * 1024,
///     }
/// }
/// ```
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub registration: Arc<dyn RegistrationService>,
    pub questions: Arc<dyn QuestionService>,
    pub uploads: Arc<dyn UploadService>,
    /// Guards the survey routes.
    pub access_tokens: Arc<dyn TokenVerifier>,
    /// Largest questionnaire accepted, in bytes.
    pub max_upload_bytes: usize,
}
