mod aggregate;
mod repository;
mod value_objects;


pub use aggregate::{sort_for_display, Task};
pub use repository::TaskRepository;
pub use value_objects::TaskFilter;
