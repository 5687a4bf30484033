//! Domain primitives, ports, and services.
//!
//! Purpose: define strongly typed values used by the HTTP adapter and the
//! outbound adapters, plus the services that implement the driving ports.
//! Types validate on construction and document their invariants.
//!
//! Public surface:
//! - Error / ErrorCode: API error payload and stable identifier.
//! - TraceId: request-scoped correlation identifier.
//! - User values (`UserAccount`, `EmailAddress`, `DisplayName`, ...).
//! - Auth values (`LoginCredentials`, `Registration`, `SessionToken`).
//! - Survey values (`Question`, `Answer`) and uploads (`UploadedFile`).
//! - Services: `AccountService`, `SurveyAnswerService`,
//!   `QuestionnaireUploadService`.

pub mod account_service;
pub mod auth;
pub mod error;
pub mod ports;
pub mod questionnaire_upload_service;
pub mod survey;
pub mod survey_answer_service;
pub mod trace_id;
pub mod upload;
pub mod user;

pub use self::account_service::AccountService;
pub use self::auth::{
    AuthenticatedUser, BEARER_TOKEN_TYPE, IssuedToken, LoginCredentials, LoginValidationError, Registration,
    RegistrationValidationError, SessionToken,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::questionnaire_upload_service::QuestionnaireUploadService;
pub use self::survey::{Answer, INVALID_QUESTION_MESSAGE, Question, QuestionValidationError};
pub use self::survey_answer_service::SurveyAnswerService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::upload::{
    EmptyUploadError, FILE_UPLOADED_MESSAGE, NO_FILE_UPLOADED_MESSAGE, StoredFile, UploadedFile,
};
pub use self::user::{
    DISPLAY_NAME_MAX, DisplayName, EmailAddress, NewUserAccount, PasswordHash, UserAccount,
    UserId, UserValidationError,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use survey_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::unauthorized("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
