//! Reqwest-backed answer source adapter.
//!
//! This adapter owns transport details only: request serialisation, timeout
//! and HTTP status mapping, and JSON decoding into a domain [`Answer`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::debug;

use super::dto::{AnswerRequestDto, AnswerResponseDto};
use crate::domain::ports::{AnswerSource, AnswerSourceError};
use crate::domain::{Answer, Question};

const USER_AGENT: &str = concat!("survey-backend/", env!("CARGO_PKG_VERSION"));

/// Answer source that POSTs questions to one endpoint of a pre-configured
/// base address.
pub struct HttpAnswerSource {
    client: Client,
    endpoint: Url,
}

impl HttpAnswerSource {
    /// Build an adapter whose requests go to `base_url` joined with `path`.
    ///
    /// ```rust,ignore
    /// let base = Url::parse("https://answers.example.com/")?;
    /// let source = HttpAnswerSource::new(&base, "api/answer", Duration::from_secs(30))?;
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`AnswerSourceError::Transport`] when the path cannot be joined
    /// onto the base address or the reqwest client cannot be constructed.
    pub fn new(base_url: &Url, path: &str, timeout: Duration) -> Result<Self, AnswerSourceError> {
        let endpoint = base_url.join(path).map_err(|error| {
            AnswerSourceError::transport(format!("invalid answer endpoint {path:?}: {error}"))
        })?;
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(map_transport_error)?;
        Ok(Self { client, endpoint })
    }

    /// Resolved endpoint URL.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl AnswerSource for HttpAnswerSource {
    async fn answer(&self, question: &Question) -> Result<Answer, AnswerSourceError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&AnswerRequestDto {
                question: question.as_str(),
            })
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            debug!(status = status.as_u16(), endpoint = %self.endpoint, "answer service rejected question");
            return Err(AnswerSourceError::upstream(status.as_u16()));
        }

        let body = response.bytes().await.map_err(map_transport_error)?;
        parse_answer(body.as_ref())
    }
}

fn parse_answer(body: &[u8]) -> Result<Answer, AnswerSourceError> {
    let decoded: AnswerResponseDto = serde_json::from_slice(body).map_err(|error| {
        AnswerSourceError::decode(format!("invalid answer JSON payload: {error}"))
    })?;
    decoded
        .into_domain_answer()
        .map_err(AnswerSourceError::decode)
}

fn map_transport_error(error: reqwest::Error) -> AnswerSourceError {
    if error.is_timeout() {
        AnswerSourceError::timeout(error.to_string())
    } else {
        AnswerSourceError::transport(error.to_string())
    }
}
