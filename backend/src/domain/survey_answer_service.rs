//! Survey question service.
//!
//! Forwards validated questions to an [`AnswerSource`] and translates its
//! failures into API errors. A non-success upstream status is passed through
//! to the caller unchanged.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::domain::ports::{AnswerSource, AnswerSourceError, QuestionService};
use crate::domain::{Answer, Error, Question};

/// Question service implementing [`QuestionService`].
#[derive(Clone)]
pub struct SurveyAnswerService<S> {
    source: Arc<S>,
}

impl<S> SurveyAnswerService<S> {
    /// Create a service over the given answer source.
    pub fn new(source: Arc<S>) -> Self {
        Self { source }
    }
}

fn map_source_error(error: AnswerSourceError) -> Error {
    match error {
        AnswerSourceError::Upstream { status } => {
            warn!(status, "answer service returned a non-success status");
            Error::upstream_failure(status)
        }
        AnswerSourceError::Timeout { message } => {
            warn!(%message, "answer service timed out");
            Error::gateway_timeout("answer service timed out")
        }
        AnswerSourceError::Transport { message } => {
            Error::internal(format!("answer service unreachable: {message}"))
        }
        AnswerSourceError::Decode { message } => {
            Error::internal(format!("answer service returned an unreadable body: {message}"))
        }
    }
}

#[async_trait]
impl<S> QuestionService for SurveyAnswerService<S>
where
    S: AnswerSource,
{
    async fn ask(&self, question: &Question) -> Result<Answer, Error> {
        self.source.answer(question).await.map_err(map_source_error)
    }
}
