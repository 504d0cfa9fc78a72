pub mod command_handler;
pub mod handlers;
pub mod loop_commands;

pub use command_handler::{Command, CommandHandler};
