pub mod loop_repo;
pub mod user_repo;

pub use loop_repo::InMemoryLoopRepository;
pub use user_repo::InMemoryUserRepository;
