use async_trait::async_trait;
use log::info;
use std::sync::Arc;

use crate::application::commands::command_handler::CommandHandler;
use crate::application::commands::task_commands::*;
use crate::application::dtos::TaskDto;
use taskstreak_domain::shared::{Clock, DomainError};
use taskstreak_domain::task::{Task, TaskRepository};

/// Add task command handler
pub struct AddTaskCommandHandler {
    task_repo: Arc<dyn TaskRepository>,
    clock: Arc<dyn Clock>,
}

impl AddTaskCommandHandler {
    pub fn new(task_repo: Arc<dyn TaskRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { task_repo, clock }
    }
}

#[async_trait]
impl CommandHandler<AddTaskCommand> for AddTaskCommandHandler {
    type Result = AddTaskResult;

    async fn handle(&self, cmd: AddTaskCommand) -> Result<Self::Result, DomainError> {
        let today = self.clock.today();
        let now = self.clock.now();

        let task = match cmd.completed_on {
            Some(completed_on) => Task::logged(&cmd.title, completed_on, today, now)?,
            None => Task::new(&cmd.title, today, now)?,
        };

        self.task_repo.insert(&task).await?;

        info!(
            "Task added: {} ({}) completed={}",
            task.title(),
            task.id(),
            task.is_completed()
        );

        Ok(AddTaskResult {
            task: TaskDto::from(&task),
        })
    }
}
