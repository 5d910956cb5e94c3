use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::shared::DomainError;

/// Task list filter offered by the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl TaskFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskFilter::All => "all",
            TaskFilter::Active => "active",
            TaskFilter::Completed => "completed",
        }
    }
}

impl FromStr for TaskFilter {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "all" => Ok(TaskFilter::All),
            "active" | "pending" => Ok(TaskFilter::Active),
            "completed" | "done" => Ok(TaskFilter::Completed),
            other => Err(DomainError::Validation(format!(
                "Unknown task filter '{}', expected all, active or completed",
                other
            ))),
        }
    }
}

impl std::fmt::Display for TaskFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
