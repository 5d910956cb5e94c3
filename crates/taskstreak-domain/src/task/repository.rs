use async_trait::async_trait;

use super::Task;
use crate::shared::{DomainError, TaskId};

/// Access to the task collection.
///
/// Implementations surface every transport, auth or quota failure as
/// `DomainError::StoreUnavailable` and never retry on their own.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Insert a new task document.
    async fn insert(&self, task: &Task) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &TaskId) -> Result<Option<Task>, DomainError>;

    /// All tasks, in no particular order.
    async fn find_all(&self) -> Result<Vec<Task>, DomainError>;

    /// Persist `completed` / `completed_date` of an existing task.
    ///
    /// Fails with `DomainError::NotFound` if the document no longer exists.
    async fn update_completion(&self, task: &Task) -> Result<(), DomainError>;

    /// Fails with `DomainError::NotFound` if the document does not exist.
    async fn delete(&self, id: &TaskId) -> Result<(), DomainError>;
}
