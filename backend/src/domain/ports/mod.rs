//! Domain ports for the hexagonal boundary.
//!
//! Driving ports are called by inbound adapters; driven ports are
//! implemented by outbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod answer_source;
mod file_storage;
mod login_service;
mod password_hasher;
mod question_service;
mod registration_service;
mod token_issuer;
mod token_verifier;
mod upload_service;
mod user_repository;

#[cfg(test)]
pub use answer_source::MockAnswerSource;
pub use answer_source::{AnswerSource, AnswerSourceError};
#[cfg(test)]
pub use file_storage::MockFileStorage;
pub use file_storage::{FileStorage, FileStorageError};
pub use login_service::LoginService;
#[cfg(test)]
pub use login_service::MockLoginService;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHasher, PasswordHasherError};
#[cfg(test)]
pub use question_service::MockQuestionService;
pub use question_service::QuestionService;
#[cfg(test)]
pub use registration_service::MockRegistrationService;
pub use registration_service::RegistrationService;
#[cfg(test)]
pub use token_issuer::MockTokenIssuer;
pub use token_issuer::{TokenIssuer, TokenIssuerError};
#[cfg(test)]
pub use token_verifier::MockTokenVerifier;
pub use token_verifier::{TokenVerifier, TokenVerifierError};
#[cfg(test)]
pub use upload_service::MockUploadService;
pub use upload_service::UploadService;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
