mod clone_loop_handler;
mod create_loop_handler;
mod delete_loop_handler;
mod shared;
mod toggle_cheer_handler;
mod update_day_status_handler;
mod update_loop_handler;


pub use clone_loop_handler::CloneLoopCommandHandler;
pub use create_loop_handler::{CreateLoopCommandHandler, SharedBackfill};
pub use delete_loop_handler::DeleteLoopCommandHandler;
pub use toggle_cheer_handler::ToggleCheerCommandHandler;
pub use update_day_status_handler::UpdateDayStatusCommandHandler;
pub use update_loop_handler::UpdateLoopCommandHandler;
