//! Wire shapes exchanged with the answering service.

use serde::{Deserialize, Serialize};

use crate::domain::Answer;

#[derive(Debug, Serialize)]
pub(super) struct AnswerRequestDto<'a> {
    pub(super) question: &'a str,
}

#[derive(Debug, Deserialize)]
pub(super) struct AnswerResponseDto {
    pub(super) answer: Option<String>,
}

impl AnswerResponseDto {
    pub(super) fn into_domain_answer(self) -> Result<Answer, String> {
        self.answer
            .map(Answer::new)
            .ok_or_else(|| "response has no `answer` field".to_owned())
    }
}
