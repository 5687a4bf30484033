//! File storage adapters.

mod directory_file_storage;

pub use directory_file_storage::DirectoryFileStorage;
