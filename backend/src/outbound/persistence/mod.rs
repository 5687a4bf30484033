//! Persistence adapters.
//!
//! The shipped adapter keeps accounts in process memory. Adapters only
//! translate between storage representations and domain types; no business
//! logic resides here.

mod in_memory_user_repository;

pub use in_memory_user_repository::InMemoryUserRepository;
