// SPDX-License-Identifier: MIT
//! Analytics data models — serialisable aggregates returned by the
//! analytics RPCs and consumed by the chat handlers.

use serde::{Deserialize, Serialize};

use crate::tasks::model::{Task, TaskStatus};

// ─── Task Summary ─────────────────────────────────────────────────────────────

/// One (status, count) entry in a task summary breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusCount {
    /// Status string form (see [`TaskStatus::as_str`]).
    pub status: String,
    pub count: u64,
}

/// Cross-task summary returned by `analytics.summary`.
///
/// Invariant: the `by_status` counts sum exactly to `total`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSummary {
    pub total: u64,
    /// Breakdown in [`TaskStatus::ALL`] declaration order; zero-count
    /// statuses are omitted.
    pub by_status: Vec<StatusCount>,
    /// Every task currently blocked, with assignee names resolved.
    /// Unbounded — no pagination (known limitation).
    pub blocked: Vec<BlockedTask>,
    /// Top 5 completed tasks by creation time, newest first.
    pub recently_completed: Vec<Task>,
}

/// A blocked task enriched with its assignee display names.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockedTask {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub assignees: Vec<String>,
    pub created_at: String,
}

/// Pure fold from a task list to the ordered status breakdown.
///
/// Iterates [`TaskStatus::ALL`] in declaration order so the result order is
/// deterministic and independent of the input order. Statuses with no tasks
/// are omitted, which keeps the sum-equals-total invariant by construction.
pub fn count_by_status(tasks: &[Task]) -> Vec<StatusCount> {
    TaskStatus::ALL
        .iter()
        .filter_map(|status| {
            let count = tasks.iter().filter(|t| t.status == status.as_str()).count() as u64;
            (count > 0).then(|| StatusCount {
                status: status.as_str().to_string(),
                count,
            })
        })
        .collect()
}

// ─── User Stats ───────────────────────────────────────────────────────────────

/// One user's active-task workload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserTaskCount {
    pub name: String,
    /// Assignments on tasks whose status is neither completed nor cancelled.
    pub active_tasks: u64,
}

/// Per-user workload stats returned by `analytics.userStats`.
///
/// Invariant: `most_busy_user` is `None` iff `tasks_per_user` is empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub total_users: u64,
    /// Sorted by active-task count descending, then name ascending.
    pub tasks_per_user: Vec<UserTaskCount>,
    /// Ties broken toward the lexicographically smallest name.
    pub most_busy_user: Option<String>,
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn task(status: TaskStatus) -> Task {
        Task {
            id: crate::tasks::model::new_id(),
            title: "t".to_string(),
            description: None,
            status: status.as_str().to_string(),
            created_at: "2026-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn count_by_status_sums_to_total() {
        let tasks = vec![
            task(TaskStatus::Created),
            task(TaskStatus::Created),
            task(TaskStatus::Completed),
            task(TaskStatus::Blocked),
        ];
        let counts = count_by_status(&tasks);
        let sum: u64 = counts.iter().map(|c| c.count).sum();
        assert_eq!(sum, tasks.len() as u64);
    }

    #[test]
    fn count_by_status_follows_declaration_order() {
        let tasks = vec![
            task(TaskStatus::Completed),
            task(TaskStatus::Created),
            task(TaskStatus::InProgress),
        ];
        let order: Vec<String> = count_by_status(&tasks).into_iter().map(|c| c.status).collect();
        assert_eq!(order, vec!["created", "in_progress", "completed"]);
    }

    #[test]
    fn count_by_status_omits_empty_statuses() {
        let counts = count_by_status(&[task(TaskStatus::Blocked)]);
        assert_eq!(counts.len(), 1);
        assert_eq!(counts[0].status, "blocked");
        assert_eq!(counts[0].count, 1);
    }

    #[test]
    fn count_by_status_empty_input() {
        assert!(count_by_status(&[]).is_empty());
    }

    #[test]
    fn task_summary_roundtrip_json() {
        let summary = TaskSummary {
            total: 1,
            by_status: vec![StatusCount { status: "created".to_string(), count: 1 }],
            blocked: vec![],
            recently_completed: vec![],
        };
        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("byStatus"));
        let back: TaskSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(back.total, 1);
    }
}
