use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, SqlitePool};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use crate::persistence::ResultExt;
use taskstreak_domain::shared::{DomainError, TaskId};
use taskstreak_domain::task::{Task, TaskRepository};

#[derive(FromRow)]
struct TaskRow {
    id: String,
    title: String,
    completed: bool,
    completed_date: Option<NaiveDate>,
    created_date: NaiveDate,
    created_at: DateTime<Utc>,
}

impl TaskRow {
    fn into_task(self) -> Result<Task, DomainError> {
        Task::restore(
            TaskId::from_string(&self.id),
            self.title,
            self.completed,
            self.completed_date,
            self.created_date,
            self.created_at,
        )
    }
}

/// Local task store on SQLite.
pub struct SqliteTaskRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteTaskRepository {
    const SELECT_QUERY: &'static str = r#"
            SELECT id, title, completed, completed_date, created_date, created_at
            FROM tasks
        "#;

    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskRepository for SqliteTaskRepository {
    async fn insert(&self, task: &Task) -> Result<(), DomainError> {
        let start = Instant::now();
        let query = r#"
            INSERT INTO tasks (id, title, completed, completed_date, created_date, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#;

        sqlx::query(query)
            .bind(task.id().as_str())
            .bind(task.title())
            .bind(task.is_completed())
            .bind(task.completed_date())
            .bind(task.created_date())
            .bind(task.created_at())
            .execute(&*self.pool)
            .await
            .to_store_err("Insert task")?;

        info!(
            "📊 insert({}): {:.2}ms",
            task.id(),
            start.elapsed().as_secs_f64() * 1000.0
        );
        Ok(())
    }

    async fn find_by_id(&self, id: &TaskId) -> Result<Option<Task>, DomainError> {
        let query = format!("{} WHERE id = ?1", Self::SELECT_QUERY);

        let row: Option<TaskRow> = sqlx::query_as(&query)
            .bind(id.as_str())
            .fetch_optional(&*self.pool)
            .await
            .to_store_err("Find task by ID")?;

        row.map(TaskRow::into_task).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Task>, DomainError> {
        let start = Instant::now();
        let query = format!(
            "{} ORDER BY created_date DESC, created_at DESC",
            Self::SELECT_QUERY
        );

        let rows: Vec<TaskRow> = sqlx::query_as(&query)
            .fetch_all(&*self.pool)
            .await
            .to_store_err("Find all tasks")?;

        let elapsed = start.elapsed();
        if elapsed.as_millis() > 100 {
            tracing::warn!(
                "🐌 SLOW QUERY: find_all() took {:.2}ms for {} tasks",
                elapsed.as_secs_f64() * 1000.0,
                rows.len()
            );
        }
        info!(
            "📊 find_all(): {:.2}ms, {} tasks loaded",
            elapsed.as_secs_f64() * 1000.0,
            rows.len()
        );

        rows.into_iter().map(TaskRow::into_task).collect()
    }

    async fn update_completion(&self, task: &Task) -> Result<(), DomainError> {
        let query = "UPDATE tasks SET completed = ?2, completed_date = ?3 WHERE id = ?1";

        let result = sqlx::query(query)
            .bind(task.id().as_str())
            .bind(task.is_completed())
            .bind(task.completed_date())
            .execute(&*self.pool)
            .await
            .to_store_err("Update task completion")?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound(task.id().to_string()));
        }

        info!(
            "📊 update_completion({}): completed={}",
            task.id(),
            task.is_completed()
        );
        Ok(())
    }

    async fn delete(&self, id: &TaskId) -> Result<(), DomainError> {
        let query = "DELETE FROM tasks WHERE id = ?1";

        let result = sqlx::query(query)
            .bind(id.as_str())
            .execute(&*self.pool)
            .await
            .to_store_err("Delete task")?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound(id.to_string()));
        }

        info!("📊 delete({})", id);
        Ok(())
    }
}
