//! Answering-service outbound adapters.
//!
//! This module provides a thin HTTP implementation of the `AnswerSource`
//! port.

mod dto;
mod http_source;

pub use http_source::HttpAnswerSource;
