use std::sync::Arc;

use crate::application::commands::handlers::*;
use crate::application::queries::{DashboardQueryService, DashboardSettings, TaskQueryService};
use taskstreak_domain::shared::Clock;
use taskstreak_domain::task::TaskRepository;

/// Command handlers container
pub struct CommandHandlers {
    pub add_task: Arc<AddTaskCommandHandler>,
    pub complete_task: Arc<CompleteTaskCommandHandler>,
    pub uncomplete_task: Arc<UncompleteTaskCommandHandler>,
    pub delete_task: Arc<DeleteTaskCommandHandler>,
}

pub struct Repositories {
    pub task: Arc<dyn TaskRepository>,
}

pub struct Queries {
    pub task: Arc<TaskQueryService>,
    pub dashboard: Arc<DashboardQueryService>,
}

/// Everything a request handler needs. Built once at startup and shared.
pub struct AppState {
    pub repositories: Repositories,
    pub queries: Queries,
    pub command_handlers: CommandHandlers,
}

impl AppState {
    pub fn new(
        task_repo: Arc<dyn TaskRepository>,
        clock: Arc<dyn Clock>,
        dashboard: DashboardSettings,
    ) -> Self {
        let command_handlers = CommandHandlers {
            add_task: Arc::new(AddTaskCommandHandler::new(task_repo.clone(), clock.clone())),
            complete_task: Arc::new(CompleteTaskCommandHandler::new(
                task_repo.clone(),
                clock.clone(),
            )),
            uncomplete_task: Arc::new(UncompleteTaskCommandHandler::new(task_repo.clone())),
            delete_task: Arc::new(DeleteTaskCommandHandler::new(task_repo.clone())),
        };

        let queries = Queries {
            task: Arc::new(TaskQueryService::new(task_repo.clone())),
            dashboard: Arc::new(DashboardQueryService::new(
                task_repo.clone(),
                clock,
                dashboard,
            )),
        };

        Self {
            repositories: Repositories { task: task_repo },
            queries,
            command_handlers,
        }
    }
}
