// Domain layer - Pure business logic
// No dependencies on infrastructure or presentation layers

pub mod activity;
pub mod shared;
pub mod task;

// Re-exports for convenience
pub use shared::{Clock, DomainError, TaskId};
pub use task::{Task, TaskFilter, TaskRepository};
