pub mod task_repo;

pub use task_repo::SqliteTaskRepository;
