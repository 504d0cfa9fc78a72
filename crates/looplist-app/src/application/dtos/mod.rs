mod loop_dto;
mod stats_dto;
mod user_dto;

pub use loop_dto::*;
pub use stats_dto::*;
pub use user_dto::*;
