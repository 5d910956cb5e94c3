use async_trait::async_trait;
use log::info;
use std::sync::Arc;

use crate::application::commands::command_handler::CommandHandler;
use crate::application::commands::task_commands::*;
use crate::application::dtos::TaskDto;
use taskstreak_domain::shared::{Clock, DomainError, TaskId};
use taskstreak_domain::task::{Task, TaskRepository};

async fn load_task(repo: &dyn TaskRepository, task_id: &str) -> Result<Task, DomainError> {
    let id = TaskId::from_string(task_id);
    repo.find_by_id(&id)
        .await?
        .ok_or_else(|| DomainError::NotFound(task_id.to_string()))
}

/// Complete task command handler
pub struct CompleteTaskCommandHandler {
    task_repo: Arc<dyn TaskRepository>,
    clock: Arc<dyn Clock>,
}

impl CompleteTaskCommandHandler {
    pub fn new(task_repo: Arc<dyn TaskRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { task_repo, clock }
    }
}

#[async_trait]
impl CommandHandler<CompleteTaskCommand> for CompleteTaskCommandHandler {
    type Result = TaskCompletionResult;

    async fn handle(&self, cmd: CompleteTaskCommand) -> Result<Self::Result, DomainError> {
        let mut task = load_task(self.task_repo.as_ref(), &cmd.task_id).await?;

        // Completing twice keeps the first completion date; nothing to write.
        if !task.is_completed() {
            task.complete(self.clock.today());
            self.task_repo.update_completion(&task).await?;
            info!("Task completed: {} on {:?}", task.id(), task.completed_date());
        }

        Ok(TaskCompletionResult {
            task: TaskDto::from(&task),
        })
    }
}

/// Uncomplete task command handler
pub struct UncompleteTaskCommandHandler {
    task_repo: Arc<dyn TaskRepository>,
}

impl UncompleteTaskCommandHandler {
    pub fn new(task_repo: Arc<dyn TaskRepository>) -> Self {
        Self { task_repo }
    }
}

#[async_trait]
impl CommandHandler<UncompleteTaskCommand> for UncompleteTaskCommandHandler {
    type Result = TaskCompletionResult;

    async fn handle(&self, cmd: UncompleteTaskCommand) -> Result<Self::Result, DomainError> {
        let mut task = load_task(self.task_repo.as_ref(), &cmd.task_id).await?;

        if task.is_completed() {
            task.uncomplete();
            self.task_repo.update_completion(&task).await?;
            info!("Task reopened: {}", task.id());
        }

        Ok(TaskCompletionResult {
            task: TaskDto::from(&task),
        })
    }
}
