mod dashboard_queries;
mod task_queries;

pub use dashboard_queries::{DashboardQueryService, DashboardSettings};
pub use task_queries::TaskQueryService;
