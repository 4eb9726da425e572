//! Task Directory data model types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Generate a new ULID string.
pub fn new_id() -> String {
    ulid::Ulid::new().to_string()
}

/// The closed set of task statuses. Stored as the snake_case string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Created,
    InProgress,
    Blocked,
    Completed,
    Cancelled,
}

/// Error returned when a string is not a valid task status.
#[derive(Debug, thiserror::Error)]
#[error("unknown task status: {0}")]
pub struct ParseStatusError(pub String);

impl TaskStatus {
    /// All statuses in declaration order. This order is the iteration
    /// contract for status breakdowns (display order, busy-user tie-break
    /// inputs), so it must stay stable.
    pub const ALL: [TaskStatus; 5] = [
        TaskStatus::Created,
        TaskStatus::InProgress,
        TaskStatus::Blocked,
        TaskStatus::Completed,
        TaskStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Created => "created",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Blocked => "blocked",
            TaskStatus::Completed => "completed",
            TaskStatus::Cancelled => "cancelled",
        }
    }

    /// A task counts toward a user's workload only while it is active.
    pub fn is_active(&self) -> bool {
        !matches!(self, TaskStatus::Completed | TaskStatus::Cancelled)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created" => Ok(TaskStatus::Created),
            "in_progress" => Ok(TaskStatus::InProgress),
            "blocked" => Ok(TaskStatus::Blocked),
            "completed" => Ok(TaskStatus::Completed),
            "cancelled" => Ok(TaskStatus::Cancelled),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    /// One of [`TaskStatus`]'s string forms; validated on write.
    pub status: String,
    /// RFC 3339 UTC timestamp.
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: String,
    pub name: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TaskAssignment {
    pub id: String,
    pub task_id: String,
    pub user_id: String,
    pub assigned_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_string_roundtrip() {
        for status in TaskStatus::ALL {
            assert_eq!(status.as_str().parse::<TaskStatus>().unwrap(), status);
        }
    }

    #[test]
    fn unknown_status_is_rejected() {
        let err = "archived".parse::<TaskStatus>().unwrap_err();
        assert!(err.to_string().contains("archived"));
    }

    #[test]
    fn active_excludes_completed_and_cancelled() {
        assert!(TaskStatus::Created.is_active());
        assert!(TaskStatus::InProgress.is_active());
        assert!(TaskStatus::Blocked.is_active());
        assert!(!TaskStatus::Completed.is_active());
        assert!(!TaskStatus::Cancelled.is_active());
    }

    #[test]
    fn status_serializes_snake_case() {
        let json = serde_json::to_string(&TaskStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
    }
}
