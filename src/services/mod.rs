// Service exports
pub mod directory;
pub mod matching;

pub use directory::{DirectoryError, InMemoryDirectory, UserDirectory};
pub use matching::{MatchService, ServiceError};
