//! Survey API handlers.
//!
//! ```text
//! POST /api/v1/survey/questions {"question":"..."}
//! POST /api/v1/survey/questionnaires (multipart/form-data, field `file`)
//! ```

use actix_multipart::{Multipart, MultipartError};
use actix_web::{post, web};
use futures_util::TryStreamExt;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::{
    Answer, Error, FILE_UPLOADED_MESSAGE, INVALID_QUESTION_MESSAGE, NO_FILE_UPLOADED_MESSAGE,
    Question, UploadedFile,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::bearer::BearerAuth;
use crate::inbound::http::state::HttpState;

/// Multipart field carrying the questionnaire.
pub const FILE_FIELD: &str = "file";

/// Question request body for `POST /api/v1/survey/questions`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRequest {
    #[serde(default)]
    pub question: Option<String>,
}

/// Answer relayed from the answering service.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnswerResponse {
    pub answer: String,
}

impl From<Answer> for AnswerResponse {
    fn from(value: Answer) -> Self {
        Self {
            answer: value.into(),
        }
    }
}

/// Multipart form accepted by the upload endpoint. Documentation only.
#[derive(ToSchema)]
pub struct QuestionnaireUpload {
    #[expect(dead_code, reason = "describes the multipart form; never constructed")]
    #[schema(value_type = String, format = Binary)]
    file: Vec<u8>,
}

/// Confirmation returned after a successful upload.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    #[schema(example = "File uploaded successfully.")]
    pub message: String,
}

/// Forward a survey question to the answering service.
///
/// A non-success upstream status is relayed as-is with an empty body.
#[utoipa::path(
    post,
    path = "/api/v1/survey/questions",
    request_body = QuestionRequest,
    responses(
        (status = 200, description = "Answer", body = AnswerResponse),
        (status = 400, description = "Invalid question", body = Error),
        (status = 401, description = "Missing, invalid or expired bearer token", body = Error),
        (status = 500, description = "Internal server error", body = Error),
        (status = 504, description = "Answering service timed out", body = Error)
    ),
    tags = ["survey"],
    operation_id = "askQuestion",
    security(("BearerToken" = []))
)]
#[post("/survey/questions")]
pub async fn ask_question(
    auth: BearerAuth,
    state: web::Data<HttpState>,
    payload: web::Json<QuestionRequest>,
) -> ApiResult<web::Json<AnswerResponse>> {
    let text = payload.into_inner().question.unwrap_or_default();
    let question =
        Question::new(text).map_err(|_| Error::invalid_request(INVALID_QUESTION_MESSAGE))?;
    debug!(user_id = %auth.user().id(), "relaying survey question");
    let answer = state.questions.ask(&question).await?;
    Ok(web::Json(AnswerResponse::from(answer)))
}

/// Store an uploaded questionnaire.
///
/// Parts larger than the configured upload limit are refused with `400`.
#[utoipa::path(
    post,
    path = "/api/v1/survey/questionnaires",
    request_body(content = QuestionnaireUpload, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "File stored", body = UploadResponse),
        (status = 400, description = "No file uploaded or file too large", body = Error),
        (status = 401, description = "Missing, invalid or expired bearer token", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["survey"],
    operation_id = "uploadQuestionnaire",
    security(("BearerToken" = []))
)]
#[post("/survey/questionnaires")]
pub async fn upload_questionnaire(
    auth: BearerAuth,
    state: web::Data<HttpState>,
    mut payload: Multipart,
) -> ApiResult<web::Json<UploadResponse>> {
    let file = read_file_part(&mut payload, state.max_upload_bytes).await?;
    debug!(user_id = %auth.user().id(), "storing questionnaire");
    state.uploads.upload(file).await?;
    Ok(web::Json(UploadResponse {
        message: FILE_UPLOADED_MESSAGE.to_owned(),
    }))
}

/// Buffer the first `file` part. A zero-length part counts as absent.
///
/// Reading stops with an error as soon as the part grows past `limit` bytes.
async fn read_file_part(
    payload: &mut Multipart,
    limit: usize,
) -> Result<Option<UploadedFile>, Error> {
    while let Some(mut field) = payload.try_next().await.map_err(map_multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let file_name = field
            .content_disposition()
            .and_then(|disposition| disposition.get_filename())
            .map(str::to_owned);
        let content_type = field.content_type().map(ToString::to_string);

        let mut content = Vec::new();
        while let Some(chunk) = field.try_next().await.map_err(map_multipart_error)? {
            if content.len().saturating_add(chunk.len()) > limit {
                debug!(limit, "questionnaire exceeds upload limit");
                return Err(file_too_large(limit));
            }
            content.extend_from_slice(&chunk);
        }
        return Ok(UploadedFile::new(file_name, content_type, content).ok());
    }
    Ok(None)
}

fn file_too_large(limit: usize) -> Error {
    Error::invalid_request(format!("File exceeds the {limit} byte upload limit."))
        .with_details(json!({ "field": FILE_FIELD, "code": "file_too_large", "maxBytes": limit }))
}

fn map_multipart_error(err: MultipartError) -> Error {
    debug!(error = %err, "unreadable multipart payload");
    Error::invalid_request(NO_FILE_UPLOADED_MESSAGE)
}

#[cfg(test)]
#[path = "survey_tests.rs"]
mod tests;
