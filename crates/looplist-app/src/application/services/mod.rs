pub mod auth_service;
pub mod demo_seeder;

pub use auth_service::{hash_password, AuthService};
pub use demo_seeder::{seed_demo_data, DemoSeedReport};
