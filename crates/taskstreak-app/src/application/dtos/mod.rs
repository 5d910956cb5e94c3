mod dashboard_dto;
mod task_dto;

pub use dashboard_dto::*;
pub use task_dto::*;
