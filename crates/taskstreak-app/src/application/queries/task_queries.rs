use log::info;
use std::sync::Arc;

use crate::application::dtos::TaskDto;
use taskstreak_domain::shared::DomainError;
use taskstreak_domain::task::{sort_for_display, TaskFilter, TaskRepository};

/// Task query service
/// Read side of the task list: filtering and display order
pub struct TaskQueryService {
    task_repo: Arc<dyn TaskRepository>,
}

impl TaskQueryService {
    pub fn new(task_repo: Arc<dyn TaskRepository>) -> Self {
        Self { task_repo }
    }

    /// Tasks matching `filter`, newest first.
    pub async fn list_tasks(&self, filter: TaskFilter) -> Result<Vec<TaskDto>, DomainError> {
        let mut tasks: Vec<_> = self
            .task_repo
            .find_all()
            .await?
            .into_iter()
            .filter(|task| task.matches(filter))
            .collect();

        sort_for_display(&mut tasks);

        info!("list_tasks(filter={}): {} tasks", filter, tasks.len());
        Ok(tasks.iter().map(TaskDto::from).collect())
    }
}
