//! Driving port for survey questions.

use async_trait::async_trait;

use crate::domain::{Answer, Error, Question};

/// Forwards a question to the answering service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionService: Send + Sync {
    async fn ask(&self, question: &Question) -> Result<Answer, Error>;
}
