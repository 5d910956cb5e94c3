use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use taskstreak_domain::task::Task;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDto {
    pub id: String,
    pub title: String,
    pub completed: bool,
    pub completed_date: Option<String>, // YYYY-MM-DD
    pub created_date: String,           // YYYY-MM-DD
    pub created_at: String,             // RFC 3339
}

impl From<&Task> for TaskDto {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id().as_str().to_string(),
            title: task.title().to_string(),
            completed: task.is_completed(),
            completed_date: task.completed_date().map(|d| d.to_string()),
            created_date: task.created_date().to_string(),
            created_at: task.created_at().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTaskInput {
    pub title: String,
    /// Log a task that was already done on this date.
    #[serde(default)]
    pub completed_on: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListTasksParams {
    #[serde(default)]
    pub filter: Option<String>,
}
