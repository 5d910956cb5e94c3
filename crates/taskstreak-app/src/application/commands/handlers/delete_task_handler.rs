use async_trait::async_trait;
use log::info;
use std::sync::Arc;

use crate::application::commands::command_handler::CommandHandler;
use crate::application::commands::task_commands::*;
use taskstreak_domain::shared::{DomainError, TaskId};
use taskstreak_domain::task::TaskRepository;

/// Delete task command handler
pub struct DeleteTaskCommandHandler {
    task_repo: Arc<dyn TaskRepository>,
}

impl DeleteTaskCommandHandler {
    pub fn new(task_repo: Arc<dyn TaskRepository>) -> Self {
        Self { task_repo }
    }
}

#[async_trait]
impl CommandHandler<DeleteTaskCommand> for DeleteTaskCommandHandler {
    type Result = ();

    async fn handle(&self, cmd: DeleteTaskCommand) -> Result<Self::Result, DomainError> {
        let id = TaskId::from_string(&cmd.task_id);
        self.task_repo.delete(&id).await?;

        info!("Task deleted: {}", id);
        Ok(())
    }
}
