mod add_task_handler;
mod completion_handlers;
mod delete_task_handler;


pub use add_task_handler::AddTaskCommandHandler;
pub use completion_handlers::{CompleteTaskCommandHandler, UncompleteTaskCommandHandler};
pub use delete_task_handler::DeleteTaskCommandHandler;
