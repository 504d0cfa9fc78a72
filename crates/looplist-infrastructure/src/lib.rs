// Infrastructure layer - Technical implementations
// Depends on domain layer, implements its interfaces

pub mod clock;
pub mod config;
pub mod events;
pub mod logging;
pub mod persistence;
