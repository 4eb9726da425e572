//! Task Directory SQLite operations.

use anyhow::{bail, Context as _, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

use super::model::{new_id, Task, TaskAssignment, TaskStatus, User};
use crate::chat::TaskDirectory;

pub struct TaskStorage {
    pool: SqlitePool,
}

impl TaskStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ─── Tasks ────────────────────────────────────────────────────────────

    pub async fn create_task(
        &self,
        title: &str,
        description: Option<&str>,
        status: TaskStatus,
    ) -> Result<Task> {
        if title.trim().is_empty() {
            bail!("task title must not be empty");
        }
        let id = new_id();
        let now = Utc::now().to_rfc3339();
        sqlx::query(
            "INSERT INTO tasks (id, title, description, status, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(title)
        .bind(description)
        .bind(status.as_str())
        .bind(&now)
        .execute(&self.pool)
        .await
        .context("insert task")?;
        self.get_task(&id).await
    }

    pub async fn get_task(&self, id: &str) -> Result<Task> {
        sqlx::query_as("SELECT * FROM tasks WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("load task")?
            .ok_or_else(|| anyhow::anyhow!("TASK_NOT_FOUND: {id}"))
    }

    /// List tasks, newest first, optionally filtered by status.
    pub async fn list_tasks(&self, status: Option<TaskStatus>) -> Result<Vec<Task>> {
        let tasks = match status {
            Some(status) => {
                sqlx::query_as("SELECT * FROM tasks WHERE status = ? ORDER BY created_at DESC")
                    .bind(status.as_str())
                    .fetch_all(&self.pool)
                    .await
            }
            None => {
                sqlx::query_as("SELECT * FROM tasks ORDER BY created_at DESC")
                    .fetch_all(&self.pool)
                    .await
            }
        }
        .context("list tasks")?;
        Ok(tasks)
    }

    pub async fn update_status(&self, id: &str, status: TaskStatus) -> Result<Task> {
        let updated = sqlx::query("UPDATE tasks SET status = ? WHERE id = ?")
            .bind(status.as_str())
            .bind(id)
            .execute(&self.pool)
            .await
            .context("update task status")?
            .rows_affected();
        if updated == 0 {
            bail!("TASK_NOT_FOUND: {id}");
        }
        self.get_task(id).await
    }

    /// Delete a task and its assignments.
    pub async fn delete_task(&self, id: &str) -> Result<()> {
        sqlx::query("DELETE FROM task_assignments WHERE task_id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("delete task assignments")?;
        let deleted = sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("delete task")?
            .rows_affected();
        if deleted == 0 {
            bail!("TASK_NOT_FOUND: {id}");
        }
        Ok(())
    }

    // ─── Users ────────────────────────────────────────────────────────────

    pub async fn create_user(&self, name: &str) -> Result<User> {
        if name.trim().is_empty() {
            bail!("user name must not be empty");
        }
        let id = new_id();
        let now = Utc::now().to_rfc3339();
        sqlx::query("INSERT INTO users (id, name, created_at) VALUES (?, ?, ?)")
            .bind(&id)
            .bind(name)
            .bind(&now)
            .execute(&self.pool)
            .await
            .context("insert user")?;
        Ok(User {
            id,
            name: name.to_string(),
            created_at: now,
        })
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        Ok(sqlx::query_as("SELECT * FROM users ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await
            .context("list users")?)
    }

    // ─── Assignments ──────────────────────────────────────────────────────

    /// Assign a user to a task. Idempotent: re-assigning is a no-op.
    pub async fn assign_user(&self, task_id: &str, user_id: &str) -> Result<TaskAssignment> {
        // Surface a task-not-found error rather than a foreign-key failure.
        self.get_task(task_id).await?;
        let id = new_id();
        let now = Utc::now().to_rfc3339();
        sqlx::query(
            "INSERT OR IGNORE INTO task_assignments (id, task_id, user_id, assigned_at) \
             VALUES (?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(task_id)
        .bind(user_id)
        .bind(&now)
        .execute(&self.pool)
        .await
        .context("insert assignment")?;

        sqlx::query_as("SELECT * FROM task_assignments WHERE task_id = ? AND user_id = ?")
            .bind(task_id)
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .context("load assignment")
    }

    /// Display names of everyone assigned to a task, name-sorted.
    pub async fn assignees_for(&self, task_id: &str) -> Result<Vec<String>> {
        let names: Vec<(String,)> = sqlx::query_as(
            "SELECT u.name FROM task_assignments a \
             JOIN users u ON u.id = a.user_id \
             WHERE a.task_id = ? ORDER BY u.name ASC",
        )
        .bind(task_id)
        .fetch_all(&self.pool)
        .await
        .context("list assignees")?;
        Ok(names.into_iter().map(|(name,)| name).collect())
    }
}

// The chat processor consumes the store through this narrow mutation trait.
#[async_trait]
impl TaskDirectory for TaskStorage {
    async fn create(&self, title: &str, description: &str, status: TaskStatus) -> Result<Task> {
        self.create_task(title, Some(description), status).await
    }
}
