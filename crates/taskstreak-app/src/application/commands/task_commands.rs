use chrono::NaiveDate;

use super::command_handler::Command;
use crate::application::dtos::TaskDto;

/// Add a pending task dated today, or log one already done on `completed_on`.
#[derive(Debug, Clone)]
pub struct AddTaskCommand {
    pub title: String,
    pub completed_on: Option<NaiveDate>,
}

impl Command for AddTaskCommand {}

#[derive(Debug, Clone)]
pub struct AddTaskResult {
    pub task: TaskDto,
}

#[derive(Debug, Clone)]
pub struct CompleteTaskCommand {
    pub task_id: String,
}

impl Command for CompleteTaskCommand {}

#[derive(Debug, Clone)]
pub struct UncompleteTaskCommand {
    pub task_id: String,
}

impl Command for UncompleteTaskCommand {}

/// Result of either completion command: the task as stored afterwards.
#[derive(Debug, Clone)]
pub struct TaskCompletionResult {
    pub task: TaskDto,
}

#[derive(Debug, Clone)]
pub struct DeleteTaskCommand {
    pub task_id: String,
}

impl Command for DeleteTaskCommand {}
