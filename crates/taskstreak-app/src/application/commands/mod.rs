pub mod command_handler;
pub mod handlers;
pub mod task_commands;
