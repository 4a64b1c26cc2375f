//! Repository Implementations
//!
//! Domain層のRepositoryトレイトの実装

pub mod in_memory_reading_repository;
pub mod mongo_reading_repository;
