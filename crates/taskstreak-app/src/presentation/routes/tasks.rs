use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use std::str::FromStr;

use super::SharedState;
use crate::application::commands::command_handler::CommandHandler;
use crate::application::commands::task_commands::*;
use crate::application::dtos::{AddTaskInput, ListTasksParams, TaskDto};
use crate::presentation::error::CommandError;
use taskstreak_domain::task::TaskFilter;

/// List tasks, optionally filtered by `all`, `active` or `completed`.
pub async fn list_tasks(
    State(state): State<SharedState>,
    Query(params): Query<ListTasksParams>,
) -> Result<Json<Vec<TaskDto>>, CommandError> {
    let filter = TaskFilter::from_str(params.filter.as_deref().unwrap_or_default())?;

    let tasks = state.queries.task.list_tasks(filter).await?;
    Ok(Json(tasks))
}

/// Add a task. With `completed_on` the task is logged as already done.
pub async fn add_task(
    State(state): State<SharedState>,
    input: Result<Json<AddTaskInput>, JsonRejection>,
) -> Result<(StatusCode, Json<TaskDto>), CommandError> {
    let Json(input) = input.map_err(|e| CommandError::validation(e.body_text()))?;

    let command = AddTaskCommand {
        title: input.title,
        completed_on: input.completed_on,
    };

    let result = state.command_handlers.add_task.handle(command).await?;
    Ok((StatusCode::CREATED, Json(result.task)))
}

pub async fn complete_task(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<TaskDto>, CommandError> {
    let result = state
        .command_handlers
        .complete_task
        .handle(CompleteTaskCommand { task_id: id })
        .await?;
    Ok(Json(result.task))
}

pub async fn uncomplete_task(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<TaskDto>, CommandError> {
    let result = state
        .command_handlers
        .uncomplete_task
        .handle(UncompleteTaskCommand { task_id: id })
        .await?;
    Ok(Json(result.task))
}

pub async fn delete_task(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<StatusCode, CommandError> {
    state
        .command_handlers
        .delete_task
        .handle(DeleteTaskCommand { task_id: id })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
