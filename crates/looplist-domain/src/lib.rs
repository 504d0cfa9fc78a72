// Domain layer - Pure business logic
// No dependencies on infrastructure or presentation layers

pub mod events;
pub mod habit_loop;
pub mod shared;
pub mod user;

// Re-exports for convenience
pub use events::DomainEvent;
pub use shared::{DomainError, LoopId, UserId};
