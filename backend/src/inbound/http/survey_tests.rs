//! Tests for survey API handlers.

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::StoredFile;
use crate::domain::ports::TokenVerifierError;
use crate::inbound::http::bearer::{EXPIRED_TOKEN_MESSAGE, MISSING_TOKEN_MESSAGE};
use crate::inbound::http::test_utils::{MockPorts, TEST_BEARER, str_field, test_app};

const BOUNDARY: &str = "survey-test-boundary";

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

fn authorised_ports() -> MockPorts {
    MockPorts::default().authorised()
}

async fn post_upload(ports: MockPorts, body: Vec<u8>) -> (StatusCode, Value) {
    let app = actix_test::init_service(test_app(ports)).await;
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/survey/questionnaires")
        .insert_header(("authorization", TEST_BEARER))
        .insert_header((
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        ))
        .set_payload(body)
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    let status = response.status();
    let value = actix_test::read_body_json(response).await;
    (status, value)
}

async fn post_question(ports: MockPorts, body: Value) -> (StatusCode, actix_web::web::Bytes) {
    let app = actix_test::init_service(test_app(ports)).await;
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/survey/questions")
        .insert_header(("authorization", TEST_BEARER))
        .set_json(&body)
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    let status = response.status();
    (status, actix_test::read_body(response).await)
}

#[rstest]
#[case(json!({"question": ""}))]
#[case(json!({"question": "   "}))]
#[case(json!({"question": null}))]
#[case(json!({}))]
#[actix_web::test]
async fn blank_question_is_rejected_without_outbound_call(#[case] body: Value) {
    let mut ports = authorised_ports();
    ports.questions.expect_ask().times(0);

    let (status, bytes) = post_question(ports, body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let value: Value = serde_json::from_slice(&bytes).expect("error payload");
    assert_eq!(str_field(&value, "message"), Some(INVALID_QUESTION_MESSAGE));
}

#[actix_web::test]
async fn answer_is_relayed() {
    let mut ports = authorised_ports();
    ports
        .questions
        .expect_ask()
        .withf(|q| q.as_str() == "test question")
        .times(1)
        .return_once(|_| Ok(Answer::new("test answer")));

    let (status, bytes) = post_question(ports, json!({"question": "test question"})).await;
    assert_eq!(status, StatusCode::OK);
    let value: Value = serde_json::from_slice(&bytes).expect("answer payload");
    assert_eq!(value, json!({"answer": "test answer"}));
}

#[rstest]
#[case(400, StatusCode::BAD_REQUEST)]
#[case(404, StatusCode::NOT_FOUND)]
#[case(500, StatusCode::INTERNAL_SERVER_ERROR)]
#[actix_web::test]
async fn upstream_status_is_passed_through_with_empty_body(
    #[case] upstream: u16,
    #[case] expected: StatusCode,
) {
    let mut ports = authorised_ports();
    ports
        .questions
        .expect_ask()
        .return_once(move |_| Err(Error::upstream_failure(upstream)));

    let (status, bytes) = post_question(ports, json!({"question": "test question"})).await;
    assert_eq!(status, expected);
    assert!(bytes.is_empty());
}

#[actix_web::test]
async fn timeout_is_gateway_timeout_envelope() {
    let mut ports = authorised_ports();
    ports
        .questions
        .expect_ask()
        .return_once(|_| Err(Error::gateway_timeout("answer service timed out")));

    let (status, bytes) = post_question(ports, json!({"question": "test question"})).await;
    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    let value: Value = serde_json::from_slice(&bytes).expect("error payload");
    assert_eq!(str_field(&value, "code"), Some("gateway_timeout"));
}

#[actix_web::test]
async fn upload_forwards_file_and_confirms() {
    let mut ports = authorised_ports();
    ports
        .uploads
        .expect_upload()
        .withf(|file| {
            file.as_ref().is_some_and(|f| {
                f.file_name() == "survey.csv"
                    && f.content_type() == Some("text/csv")
                    && f.content() == b"q1,q2\n"
            })
        })
        .times(1)
        .return_once(|_| {
            Ok(StoredFile {
                storage_key: "abc-survey.csv".to_owned(),
                size: 6,
            })
        });

    let (status, value) = post_upload(ports, multipart_body(FILE_FIELD, "survey.csv", b"q1,q2\n")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(value, json!({"message": FILE_UPLOADED_MESSAGE}));
}

#[rstest]
#[case::empty_file(multipart_body(FILE_FIELD, "survey.csv", b""))]
#[case::wrong_field(multipart_body("attachment", "survey.csv", b"q1,q2\n"))]
#[actix_web::test]
async fn unusable_part_reaches_service_as_absent(#[case] body: Vec<u8>) {
    let mut ports = authorised_ports();
    ports
        .uploads
        .expect_upload()
        .withf(Option::is_none)
        .times(1)
        .return_once(|_| Err(Error::invalid_request(NO_FILE_UPLOADED_MESSAGE)));

    let (status, value) = post_upload(ports, body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(str_field(&value, "message"), Some(NO_FILE_UPLOADED_MESSAGE));
}

#[actix_web::test]
async fn non_multipart_request_is_rejected() {
    let mut ports = authorised_ports();
    ports.uploads.expect_upload().times(0);

    let app = actix_test::init_service(test_app(ports)).await;
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/survey/questionnaires")
        .insert_header(("authorization", TEST_BEARER))
        .set_json(&json!({"file": "nope"}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let value: Value = actix_test::read_body_json(response).await;
    assert_eq!(str_field(&value, "message"), Some(NO_FILE_UPLOADED_MESSAGE));
}

#[actix_web::test]
async fn storage_failure_is_redacted() {
    let mut ports = authorised_ports();
    ports
        .uploads
        .expect_upload()
        .return_once(|_| Err(Error::internal("file storage io failed: disk full")));

    let (status, value) = post_upload(ports, multipart_body(FILE_FIELD, "survey.csv", b"x")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(str_field(&value, "message"), Some("Internal server error"));
}

#[actix_web::test]
async fn upload_over_limit_is_rejected_before_storage() {
    let mut ports = authorised_ports();
    ports.max_upload_bytes = 16;
    ports.uploads.expect_upload().times(0);

    let (status, value) =
        post_upload(ports, multipart_body(FILE_FIELD, "survey.csv", &[b'x'; 17])).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(str_field(&value, "code"), Some("invalid_request"));
    assert_eq!(value["details"]["code"], json!("file_too_large"));
    assert_eq!(value["details"]["maxBytes"], json!(16));
}

#[actix_web::test]
async fn upload_at_limit_is_accepted() {
    let mut ports = authorised_ports();
    ports.max_upload_bytes = 16;
    ports
        .uploads
        .expect_upload()
        .withf(|file| file.as_ref().is_some_and(|f| f.len() == 16))
        .times(1)
        .return_once(|_| {
            Ok(StoredFile {
                storage_key: "abc-survey.csv".to_owned(),
                size: 16,
            })
        });

    let (status, _) =
        post_upload(ports, multipart_body(FILE_FIELD, "survey.csv", &[b'x'; 16])).await;
    assert_eq!(status, StatusCode::OK);
}

#[rstest]
#[case::question("/api/v1/survey/questions")]
#[case::upload("/api/v1/survey/questionnaires")]
#[actix_web::test]
async fn survey_routes_require_bearer_token(#[case] uri: &str) {
    let mut ports = MockPorts::default();
    ports.access_tokens.expect_verify().times(0);
    ports.questions.expect_ask().times(0);
    ports.uploads.expect_upload().times(0);

    let app = actix_test::init_service(test_app(ports)).await;
    let request = actix_test::TestRequest::post()
        .uri(uri)
        .insert_header((
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        ))
        .set_payload(multipart_body(FILE_FIELD, "survey.csv", b"q1,q2\n"))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let value: Value = actix_test::read_body_json(response).await;
    assert_eq!(str_field(&value, "code"), Some("unauthorized"));
    assert_eq!(str_field(&value, "message"), Some(MISSING_TOKEN_MESSAGE));
}

#[actix_web::test]
async fn expired_token_cannot_ask_questions() {
    let mut ports = MockPorts::default();
    ports
        .access_tokens
        .expect_verify()
        .times(1)
        .return_once(|_| Err(TokenVerifierError::expired()));
    ports.questions.expect_ask().times(0);

    let (status, bytes) = post_question(ports, json!({"question": "test question"})).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let value: Value = serde_json::from_slice(&bytes).expect("error payload");
    assert_eq!(str_field(&value, "message"), Some(EXPIRED_TOKEN_MESSAGE));
}
