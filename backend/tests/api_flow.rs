//! End-to-end flows through the full `/api/v1` surface.
//!
//! The app is assembled from the real domain services and outbound adapters:
//! the in-memory user store, Argon2 hashing with light parameters, HS256
//! tokens, a directory-backed upload store in a temp dir and an HTTP
//! answering client aimed at a local stub server.

use std::sync::Arc;
use std::time::Duration;

use actix_web::dev::ServerHandle;
use actix_web::http::StatusCode;
use actix_web::{App, HttpResponse, HttpServer, test, web};
use argon2::Params;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use chrono::{TimeZone, Utc};
use mockable::{Clock, DefaultClock, MockClock};
use reqwest::Url;
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use tempfile::TempDir;

use survey_backend::Trace;
use survey_backend::domain::ports::TokenIssuer;
use survey_backend::domain::{
    AccountService, DisplayName, EmailAddress, NewUserAccount, PasswordHash,
    QuestionnaireUploadService, SurveyAnswerService, TRACE_ID_HEADER, UserAccount, UserId,
};
use survey_backend::inbound::http::configure;
use survey_backend::inbound::http::state::HttpState;
use survey_backend::outbound::answers::HttpAnswerSource;
use survey_backend::outbound::persistence::InMemoryUserRepository;
use survey_backend::outbound::security::{
    AccessClaims, Argon2PasswordHasher, JwtTokenIssuer, JwtTokenVerifier, SigningSecret,
};
use survey_backend::outbound::storage::DirectoryFileStorage;

const SECRET: &[u8] = b"integration-secret-integration-secret";
const ISSUER: &str = "survey-it";
const BOUNDARY: &str = "api-flow-boundary";
const MAX_UPLOAD_BYTES: usize = 64 * 1024;

struct Harness {
    state: web::Data<HttpState>,
    uploads: TempDir,
    /// `Authorization` header value for a registered-looking caller.
    bearer: String,
}

fn surveyor() -> UserAccount {
    UserAccount::from_new(
        UserId::new(1).expect("positive id"),
        NewUserAccount {
            email: EmailAddress::new("surveyor@example.com").expect("valid email"),
            display_name: DisplayName::new("Surveyor").expect("valid name"),
            password_hash: PasswordHash::new("$argon2id$unused").expect("hash"),
        },
    )
}

fn bearer_from(clock: Arc<dyn Clock>) -> String {
    let token = JwtTokenIssuer::new(
        &SigningSecret::from_bytes(SECRET),
        ISSUER,
        Duration::from_secs(600),
        clock,
    )
    .issue(&surveyor())
    .expect("token signs");
    format!("Bearer {}", token.access_token)
}

fn expired_bearer() -> String {
    let mut clock = MockClock::new();
    let issued = Utc
        .timestamp_opt(1_700_000_000, 0)
        .single()
        .expect("valid timestamp");
    clock.expect_utc().return_const(issued);
    bearer_from(Arc::new(clock))
}

fn wire(answer_base: &Url) -> Harness {
    let uploads = tempfile::tempdir().expect("upload dir");
    let params = Params::new(8, 1, 1, None).expect("valid argon2 params");
    let tokens = JwtTokenIssuer::new(
        &SigningSecret::from_bytes(SECRET),
        ISSUER,
        Duration::from_secs(600),
        Arc::new(DefaultClock),
    );
    let accounts = Arc::new(AccountService::new(
        Arc::new(InMemoryUserRepository::default()),
        Arc::new(Argon2PasswordHasher::with_params(params)),
        Arc::new(tokens),
    ));
    let source = HttpAnswerSource::new(answer_base, "api/answer", Duration::from_millis(500))
        .expect("answer source");
    let storage = DirectoryFileStorage::open(uploads.path()).expect("storage");

    let state = web::Data::new(HttpState {
        login: accounts.clone(),
        registration: accounts,
        questions: Arc::new(SurveyAnswerService::new(Arc::new(source))),
        uploads: Arc::new(QuestionnaireUploadService::new(Arc::new(storage))),
        access_tokens: Arc::new(JwtTokenVerifier::new(
            &SigningSecret::from_bytes(SECRET),
            ISSUER,
        )),
        max_upload_bytes: MAX_UPLOAD_BYTES,
    });
    Harness {
        state,
        uploads,
        bearer: bearer_from(Arc::new(DefaultClock)),
    }
}

fn app(
    state: web::Data<HttpState>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .wrap(Trace)
        .service(web::scope("/api/v1").configure(configure))
}

/// Answering service stub: echoes questions, fails on "boom", stalls on "slow".
fn answer_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/api/answer",
        web::post().to(|body: web::Json<Value>| async move {
            match body.get("question").and_then(Value::as_str) {
                Some("boom") => HttpResponse::ServiceUnavailable().body("model offline"),
                Some("slow") => {
                    tokio::time::sleep(Duration::from_secs(2)).await;
                    HttpResponse::Ok().json(json!({ "answer": "too late" }))
                }
                Some(question) => {
                    HttpResponse::Ok().json(json!({ "answer": format!("re: {question}") }))
                }
                None => HttpResponse::BadRequest().finish(),
            }
        }),
    );
}

fn start_answer_stub() -> (Url, ServerHandle) {
    let server = HttpServer::new(|| App::new().configure(answer_routes))
        .workers(1)
        .bind(("127.0.0.1", 0))
        .expect("bind stub server");
    let addr = server.addrs()[0];
    let server = server.run();
    let handle = server.handle();
    actix_web::rt::spawn(server);
    let base = Url::parse(&format!("http://{addr}/")).expect("stub base url");
    (base, handle)
}

#[fixture]
fn unreachable_answers() -> Url {
    Url::parse("http://127.0.0.1:9/").expect("literal url")
}

fn multipart_body(field: &str, file_name: &str, content: &[u8]) -> Vec<u8> {
    let mut body = format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n\
         Content-Type: text/csv\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn register_request(email: &str, full_name: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/v1/accounts/register")
        .set_json(json!({ "email": email, "password": "hunter22", "fullName": full_name }))
}

fn sign_in_request(email: &str, password: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/v1/accounts/sign-in")
        .set_json(json!({ "email": email, "password": password }))
}

#[rstest]
#[actix_web::test]
async fn register_then_sign_in_issues_verifiable_token(unreachable_answers: Url) {
    let harness = wire(&unreachable_answers);
    let app = test::init_service(app(harness.state.clone())).await;

    let registered = test::call_service(&app, register_request("ada@example.com", "Ada").to_request()).await;
    assert_eq!(registered.status(), StatusCode::OK);
    assert!(registered.headers().contains_key(TRACE_ID_HEADER));

    let response = test::call_service(
        &app,
        sign_in_request("ada@example.com", "hunter22").to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["tokenType"], "Bearer");
    assert_eq!(body["userName"], "Ada");
    assert_eq!(body["expiresIn"], 600);

    let token = body["accessToken"].as_str().expect("access token");
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);
    let claims = decode::<AccessClaims>(token, &DecodingKey::from_secret(SECRET), &validation)
        .expect("token verifies")
        .claims;
    assert_eq!(claims.email, "ada@example.com");
    assert_eq!(claims.name, "Ada");
    assert_eq!(claims.exp - claims.iat, 600);
}

#[rstest]
#[case("ada@example.com", "wrong-password")]
#[case("nobody@example.com", "hunter22")]
#[actix_web::test]
async fn bad_credentials_are_unauthorized(
    unreachable_answers: Url,
    #[case] email: &str,
    #[case] password: &str,
) {
    let harness = wire(&unreachable_answers);
    let app = test::init_service(app(harness.state.clone())).await;
    let registered = test::call_service(&app, register_request("ada@example.com", "Ada").to_request()).await;
    assert_eq!(registered.status(), StatusCode::OK);

    let response = test::call_service(&app, sign_in_request(email, password).to_request()).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["code"], "unauthorized");
    assert!(body.get("accessToken").is_none());
}

#[rstest]
#[actix_web::test]
async fn duplicate_registration_is_rejected(unreachable_answers: Url) {
    let harness = wire(&unreachable_answers);
    let app = test::init_service(app(harness.state.clone())).await;

    let first = test::call_service(&app, register_request("ada@example.com", "Ada").to_request()).await;
    assert_eq!(first.status(), StatusCode::OK);

    let second = test::call_service(&app, register_request("ada@example.com", "Ada Again").to_request()).await;
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(second).await;
    assert_eq!(body["code"], "conflict");
    assert!(body["message"].as_str().expect("message").contains("already exist"));
}

#[rstest]
#[actix_web::test]
async fn questionnaire_upload_lands_in_upload_dir(unreachable_answers: Url) {
    let harness = wire(&unreachable_answers);
    let app = test::init_service(app(harness.state.clone())).await;

    let request = test::TestRequest::post()
        .uri("/api/v1/survey/questionnaires")
        .insert_header(("authorization", harness.bearer.as_str()))
        .insert_header((
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        ))
        .set_payload(multipart_body("file", "wave-1.csv", b"q1,q2\nyes,no\n"))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["message"], "File uploaded successfully.");

    let stored: Vec<_> = std::fs::read_dir(harness.uploads.path())
        .expect("list uploads")
        .filter_map(Result::ok)
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with("-wave-1.csv"))
        .collect();
    assert_eq!(stored.len(), 1);
    let content = std::fs::read(harness.uploads.path().join(&stored[0])).expect("read upload");
    assert_eq!(content, b"q1,q2\nyes,no\n");
}

#[rstest]
#[actix_web::test]
async fn upload_without_file_part_is_bad_request(unreachable_answers: Url) {
    let harness = wire(&unreachable_answers);
    let app = test::init_service(app(harness.state.clone())).await;

    let request = test::TestRequest::post()
        .uri("/api/v1/survey/questionnaires")
        .insert_header(("authorization", harness.bearer.as_str()))
        .insert_header((
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        ))
        .set_payload(multipart_body("attachment", "wave-1.csv", b"q1"))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["message"], "No file uploaded.");
}

#[actix_web::test]
async fn questions_are_relayed_to_answering_service() {
    let (base, handle) = start_answer_stub();
    let harness = wire(&base);
    let app = test::init_service(app(harness.state.clone())).await;

    let ok = test::TestRequest::post()
        .uri("/api/v1/survey/questions")
        .insert_header(("authorization", harness.bearer.as_str()))
        .set_json(json!({ "question": "how are you?" }))
        .to_request();
    let response = test::call_service(&app, ok).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["answer"], "re: how are you?");

    let failing = test::TestRequest::post()
        .uri("/api/v1/survey/questions")
        .insert_header(("authorization", harness.bearer.as_str()))
        .set_json(json!({ "question": "boom" }))
        .to_request();
    let response = test::call_service(&app, failing).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert!(test::read_body(response).await.is_empty());

    let slow = test::TestRequest::post()
        .uri("/api/v1/survey/questions")
        .insert_header(("authorization", harness.bearer.as_str()))
        .set_json(json!({ "question": "slow" }))
        .to_request();
    let response = test::call_service(&app, slow).await;
    assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);

    handle.stop(false).await;
}

#[rstest]
#[actix_web::test]
async fn blank_question_never_reaches_answering_service(unreachable_answers: Url) {
    let harness = wire(&unreachable_answers);
    let app = test::init_service(app(harness.state.clone())).await;

    let request = test::TestRequest::post()
        .uri("/api/v1/survey/questions")
        .insert_header(("authorization", harness.bearer.as_str()))
        .set_json(json!({ "question": "   " }))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["message"], "Invalid question");
}

#[rstest]
#[actix_web::test]
async fn incoming_trace_id_is_echoed(unreachable_answers: Url) {
    let harness = wire(&unreachable_answers);
    let app = test::init_service(app(harness.state.clone())).await;
    let trace_id = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

    let request = sign_in_request("", "")
        .insert_header((TRACE_ID_HEADER, trace_id))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok()),
        Some(trace_id)
    );
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["traceId"], trace_id);
}

#[rstest]
#[actix_web::test]
async fn signed_in_token_opens_survey_routes(unreachable_answers: Url) {
    let harness = wire(&unreachable_answers);
    let app = test::init_service(app(harness.state.clone())).await;
    let registered =
        test::call_service(&app, register_request("ada@example.com", "Ada").to_request()).await;
    assert_eq!(registered.status(), StatusCode::OK);
    let signed_in = test::call_service(
        &app,
        sign_in_request("ada@example.com", "hunter22").to_request(),
    )
    .await;
    let body: Value = test::read_body_json(signed_in).await;
    let token = body["accessToken"].as_str().expect("access token");

    let request = test::TestRequest::post()
        .uri("/api/v1/survey/questionnaires")
        .insert_header(("authorization", format!("Bearer {token}")))
        .insert_header((
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        ))
        .set_payload(multipart_body("file", "wave-2.csv", b"q1\n"))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[rstest]
#[case::missing(None)]
#[case::expired(Some(expired_bearer()))]
#[case::malformed(Some("Bearer not.a.token".to_owned()))]
#[actix_web::test]
async fn survey_routes_reject_unauthenticated_callers(
    unreachable_answers: Url,
    #[case] authorization: Option<String>,
) {
    let harness = wire(&unreachable_answers);
    let app = test::init_service(app(harness.state.clone())).await;

    let mut question = test::TestRequest::post()
        .uri("/api/v1/survey/questions")
        .set_json(json!({ "question": "how are you?" }));
    let mut upload = test::TestRequest::post()
        .uri("/api/v1/survey/questionnaires")
        .insert_header((
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        ))
        .set_payload(multipart_body("file", "wave-1.csv", b"q1\n"));
    if let Some(value) = authorization {
        question = question.insert_header(("authorization", value.clone()));
        upload = upload.insert_header(("authorization", value));
    }

    for request in [question, upload] {
        let response = test::call_service(&app, request.to_request()).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["code"], "unauthorized");
    }
    let stored = std::fs::read_dir(harness.uploads.path())
        .expect("list uploads")
        .count();
    assert_eq!(stored, 0);
}

#[rstest]
#[actix_web::test]
async fn oversized_questionnaire_is_refused(unreachable_answers: Url) {
    let harness = wire(&unreachable_answers);
    let app = test::init_service(app(harness.state.clone())).await;
    let oversized = vec![b'x'; MAX_UPLOAD_BYTES + 1];

    let request = test::TestRequest::post()
        .uri("/api/v1/survey/questionnaires")
        .insert_header(("authorization", harness.bearer.as_str()))
        .insert_header((
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        ))
        .set_payload(multipart_body("file", "huge.csv", &oversized))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["details"]["code"], "file_too_large");
    let stored = std::fs::read_dir(harness.uploads.path())
        .expect("list uploads")
        .count();
    assert_eq!(stored, 0);
}
