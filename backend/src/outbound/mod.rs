//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: account storage (in-memory)
//! - **security**: Argon2 password hashing and JWT issuance
//! - **answers**: reqwest client for the answering service
//! - **storage**: directory-backed questionnaire storage
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod answers;
pub mod persistence;
pub mod security;
pub mod storage;
