// SPDX-License-Identifier: MIT
//! Analytics aggregation — on-demand reads over the tasks tables.
//!
//! Every call computes fresh aggregates; nothing is cached. Ordering rules
//! are part of the contract: `by_status` follows [`TaskStatus::ALL`]
//! declaration order, and `tasks_per_user` is sorted by active-task count
//! descending with ties broken by name ascending, which also makes the
//! busiest-user pick deterministic.

use anyhow::{Context as _, Result};
use async_trait::async_trait;
use sqlx::SqlitePool;

use super::model::{count_by_status, BlockedTask, TaskSummary, UserStats, UserTaskCount};
use crate::chat::AnalyticsAggregator;
use crate::tasks::model::Task;

pub struct AnalyticsStorage {
    pool: SqlitePool,
}

impl AnalyticsStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ─── Task summary ─────────────────────────────────────────────────────

    /// Compute the cross-task summary: total, status breakdown, blocked
    /// tasks (with assignees), and the five most recent completions.
    pub async fn get_tasks_summary(&self) -> Result<TaskSummary> {
        let tasks: Vec<Task> = sqlx::query_as("SELECT * FROM tasks")
            .fetch_all(&self.pool)
            .await
            .context("load tasks for summary")?;

        let total = tasks.len() as u64;
        let by_status = count_by_status(&tasks);

        let mut blocked = Vec::new();
        for task in tasks.iter().filter(|t| t.status == "blocked") {
            let assignees = self.assignee_names(&task.id).await?;
            blocked.push(BlockedTask {
                id: task.id.clone(),
                title: task.title.clone(),
                description: task.description.clone(),
                assignees,
                created_at: task.created_at.clone(),
            });
        }
        // Oldest blocker first — it has been stuck the longest.
        blocked.sort_by(|a, b| a.created_at.cmp(&b.created_at));

        let mut recently_completed: Vec<Task> = tasks
            .into_iter()
            .filter(|t| t.status == "completed")
            .collect();
        recently_completed.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        recently_completed.truncate(5);

        Ok(TaskSummary {
            total,
            by_status,
            blocked,
            recently_completed,
        })
    }

    async fn assignee_names(&self, task_id: &str) -> Result<Vec<String>> {
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT u.name FROM task_assignments a \
             JOIN users u ON u.id = a.user_id \
             WHERE a.task_id = ? ORDER BY u.name ASC",
        )
        .bind(task_id)
        .fetch_all(&self.pool)
        .await
        .context("load assignee names")?;
        Ok(rows.into_iter().map(|(name,)| name).collect())
    }

    // ─── User stats ───────────────────────────────────────────────────────

    /// Compute per-user active-task workload. A task counts while its
    /// status is outside {completed, cancelled}.
    pub async fn get_user_stats(&self) -> Result<UserStats> {
        let total_users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .context("count users")?;

        let rows: Vec<(String, i64)> = sqlx::query_as(
            "SELECT u.name, COUNT(*) AS cnt \
               FROM task_assignments a \
               JOIN users u ON u.id = a.user_id \
               JOIN tasks t ON t.id = a.task_id \
              WHERE t.status NOT IN ('completed', 'cancelled') \
           GROUP BY u.name",
        )
        .fetch_all(&self.pool)
        .await
        .context("count active tasks per user")?;

        let mut tasks_per_user: Vec<UserTaskCount> = rows
            .into_iter()
            .map(|(name, count)| UserTaskCount {
                name,
                active_tasks: count as u64,
            })
            .collect();
        // Count descending, name ascending. The lexical tie-break makes the
        // busiest-user pick deterministic.
        tasks_per_user.sort_by(|a, b| {
            b.active_tasks
                .cmp(&a.active_tasks)
                .then_with(|| a.name.cmp(&b.name))
        });

        let most_busy_user = tasks_per_user.first().map(|u| u.name.clone());

        Ok(UserStats {
            total_users: total_users as u64,
            tasks_per_user,
            most_busy_user,
        })
    }
}

// The chat processor consumes the aggregator through this read-only trait.
#[async_trait]
impl AnalyticsAggregator for AnalyticsStorage {
    async fn tasks_summary(&self) -> Result<TaskSummary> {
        self.get_tasks_summary().await
    }

    async fn user_stats(&self) -> Result<UserStats> {
        self.get_user_stats().await
    }
}
