use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::value_objects::TaskFilter;
use crate::shared::{DomainError, TaskId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    completed: bool,
    completed_date: Option<NaiveDate>,
    created_date: NaiveDate,
    created_at: DateTime<Utc>,
}

impl Task {
    /// Create a pending task dated `today`.
    pub fn new(title: &str, today: NaiveDate, now: DateTime<Utc>) -> Result<Self, DomainError> {
        let title = Self::validate_title(title)?;

        Ok(Self {
            id: TaskId::new(),
            title,
            completed: false,
            completed_date: None,
            created_date: today,
            created_at: now,
        })
    }

    /// Create a task that was already done on `completed_on`.
    pub fn logged(
        title: &str,
        completed_on: NaiveDate,
        today: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if completed_on > today {
            return Err(DomainError::Validation(format!(
                "Completion date {} is in the future",
                completed_on
            )));
        }

        let title = Self::validate_title(title)?;

        Ok(Self {
            id: TaskId::new(),
            title,
            completed: true,
            completed_date: Some(completed_on),
            created_date: completed_on,
            created_at: now,
        })
    }

    /// Rebuild a task from a stored document.
    pub fn restore(
        id: TaskId,
        title: String,
        completed: bool,
        completed_date: Option<NaiveDate>,
        created_date: NaiveDate,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if completed != completed_date.is_some() {
            return Err(DomainError::DataIntegrity(format!(
                "Task {} has completed={} but completed_date={:?}",
                id, completed, completed_date
            )));
        }

        Ok(Self {
            id,
            title,
            completed,
            completed_date,
            created_date,
            created_at,
        })
    }

    fn validate_title(title: &str) -> Result<String, DomainError> {
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return Err(DomainError::Validation(
                "Task title cannot be empty".to_string(),
            ));
        }
        Ok(trimmed.to_string())
    }

    pub fn id(&self) -> &TaskId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn completed_date(&self) -> Option<NaiveDate> {
        self.completed_date
    }

    pub fn created_date(&self) -> NaiveDate {
        self.created_date
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Mark as done on `today`. A task that is already done keeps its date.
    pub fn complete(&mut self, today: NaiveDate) {
        if self.completed {
            return;
        }
        self.completed = true;
        self.completed_date = Some(today);
    }

    pub fn uncomplete(&mut self) {
        self.completed = false;
        self.completed_date = None;
    }

    pub fn matches(&self, filter: TaskFilter) -> bool {
        match filter {
            TaskFilter::All => true,
            TaskFilter::Active => !self.completed,
            TaskFilter::Completed => self.completed,
        }
    }
}

/// Newest first: `created_date` desc, then `created_at` desc, then id.
pub fn sort_for_display(tasks: &mut [Task]) {
    tasks.sort_by(|a, b| {
        b.created_date
            .cmp(&a.created_date)
            .then_with(|| b.created_at.cmp(&a.created_at))
            .then_with(|| a.id.cmp(&b.id))
    });
}
