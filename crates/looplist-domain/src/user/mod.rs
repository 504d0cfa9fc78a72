mod aggregate;
mod context;
mod repository;

pub use aggregate::{User, DEFAULT_AVATAR_BASE};
pub use context::UserContext;
pub use repository::UserRepository;
