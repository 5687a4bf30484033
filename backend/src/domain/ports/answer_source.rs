//! Driven port for the external question-answering service.
//!
//! Adapters own transport details (base address, timeouts, JSON shape) and
//! report failures through [`AnswerSourceError`].

use async_trait::async_trait;

use crate::domain::{Answer, Question};

use super::define_port_error;

define_port_error! {
    /// Errors surfaced while asking the answering service.
    pub enum AnswerSourceError {
        /// The service replied with a non-success status.
        Upstream { status: u16 } => "answer service responded with status {status}",
        /// The call exceeded the configured timeout.
        Timeout { message: String } => "answer service timed out: {message}",
        /// Network transport failed before a response arrived.
        Transport { message: String } => "answer service transport failed: {message}",
        /// A success response could not be decoded.
        Decode { message: String } => "answer service response decode failed: {message}",
    }
}

/// Port for forwarding a question to the answering service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnswerSource: Send + Sync {
    /// Ask one question and return the upstream answer.
    async fn answer(&self, question: &Question) -> Result<Answer, AnswerSourceError>;
}
