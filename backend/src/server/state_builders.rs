//! Builders wiring outbound adapters into the HTTP state.

use std::io;
use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::info;

use survey_backend::domain::{AccountService, QuestionnaireUploadService, SurveyAnswerService};
use survey_backend::inbound::http::state::HttpState;
use survey_backend::outbound::answers::HttpAnswerSource;
use survey_backend::outbound::persistence::InMemoryUserRepository;
use survey_backend::outbound::security::{
    Argon2PasswordHasher, BuildMode, JwtTokenIssuer, JwtTokenVerifier, SigningSecret,
};
use survey_backend::outbound::storage::DirectoryFileStorage;
use survey_backend::settings::ServerSettings;

type SurveyAccounts = AccountService<InMemoryUserRepository, Argon2PasswordHasher, JwtTokenIssuer>;

fn load_signing_secret(settings: &ServerSettings, mode: BuildMode) -> io::Result<SigningSecret> {
    let secret_path = settings.jwt_secret_file();
    let secret = SigningSecret::load(&secret_path, mode, settings.allow_ephemeral_secret)
        .map_err(io::Error::other)?;
    info!(
        fingerprint = %secret.fingerprint(),
        ephemeral = secret.is_ephemeral(),
        "access token signing secret loaded"
    );
    Ok(secret)
}

fn build_accounts(settings: &ServerSettings, secret: &SigningSecret) -> Arc<SurveyAccounts> {
    let tokens = JwtTokenIssuer::new(
        secret,
        settings.token_issuer(),
        settings.token_ttl(),
        Arc::new(DefaultClock),
    );
    Arc::new(AccountService::new(
        Arc::new(InMemoryUserRepository::default()),
        Arc::new(Argon2PasswordHasher::new()),
        Arc::new(tokens),
    ))
}

fn build_answer_source(settings: &ServerSettings) -> io::Result<HttpAnswerSource> {
    let base_url = settings
        .answer_base_url()
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;
    let source = HttpAnswerSource::new(&base_url, settings.answer_path(), settings.answer_timeout())
        .map_err(io::Error::other)?;
    info!(endpoint = %source.endpoint(), "answering service configured");
    Ok(source)
}

fn build_file_storage(settings: &ServerSettings) -> io::Result<DirectoryFileStorage> {
    let upload_dir = settings.upload_dir();
    let storage = DirectoryFileStorage::open(&upload_dir).map_err(|err| {
        io::Error::new(
            err.kind(),
            format!("failed to open upload directory {}: {err}", upload_dir.display()),
        )
    })?;
    info!(path = %upload_dir.display(), "questionnaire storage ready");
    Ok(storage)
}

fn build_state_for_mode(settings: &ServerSettings, mode: BuildMode) -> io::Result<HttpState> {
    let secret = load_signing_secret(settings, mode)?;
    let accounts = build_accounts(settings, &secret);
    let access_tokens = JwtTokenVerifier::new(&secret, settings.token_issuer());
    let questions = SurveyAnswerService::new(Arc::new(build_answer_source(settings)?));
    let uploads = QuestionnaireUploadService::new(Arc::new(build_file_storage(settings)?));
    info!(max_bytes = settings.max_upload_bytes(), "upload limit configured");

    Ok(HttpState {
        login: accounts.clone(),
        registration: accounts,
        questions: Arc::new(questions),
        uploads: Arc::new(uploads),
        access_tokens: Arc::new(access_tokens),
        max_upload_bytes: settings.max_upload_bytes(),
    })
}

/// Build the shared HTTP state from the configured adapters.
///
/// # Errors
/// Propagates [`io::Error`] when the signing secret, answer endpoint or
/// upload directory cannot be prepared.
pub(super) fn build_http_state(settings: &ServerSettings) -> io::Result<web::Data<HttpState>> {
    build_state_for_mode(settings, BuildMode::from_debug_assertions()).map(web::Data::new)
}
