//! User storage adapters.
//!
//! State lives for the lifetime of the process and is lost on restart.

mod in_memory_user_repository;

pub use in_memory_user_repository::InMemoryUserRepository;
