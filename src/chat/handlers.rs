//! Per-intent chat handlers.
//!
//! Each handler makes at most one collaborator call, converts any failure
//! into an apologetic reply, and never propagates errors upward. No retries.

use tracing::warn;

use super::extract::{self, TitleExtraction};
use super::respond::{self, Reply};
use super::{AnalyticsAggregator, Picker, TaskDirectory};
use crate::tasks::model::TaskStatus;

/// CreateTask intent: extract a title, then create through the directory.
/// On `NoMatch` no creation is attempted.
pub async fn create_task(directory: &dyn TaskDirectory, raw_message: &str) -> Reply {
    let title = match extract::title(raw_message) {
        TitleExtraction::Title(title) => title,
        TitleExtraction::NoMatch => return respond::clarify_title(),
    };

    match directory
        .create(&title, respond::CHAT_TASK_DESCRIPTION, TaskStatus::Created)
        .await
    {
        Ok(task) => {
            let task_json = serde_json::to_value(&task).unwrap_or_default();
            respond::task_created(&task.id, &title, task_json)
        }
        Err(e) => {
            warn!(err = %e, "task creation failed");
            respond::collaborator_failure(&e.to_string())
        }
    }
}

/// StatusQuery intent: fetch the summary and render the status report.
pub async fn status_query(analytics: &dyn AnalyticsAggregator) -> Reply {
    match analytics.tasks_summary().await {
        Ok(summary) => {
            let summary_json = serde_json::to_value(&summary).unwrap_or_default();
            respond::status_report(&summary, summary_json)
        }
        Err(e) => {
            warn!(err = %e, "task summary failed");
            respond::collaborator_failure(&e.to_string())
        }
    }
}

/// BlockedQuery intent: reuse the summary call; the empty and non-empty
/// cases produce observably different replies.
pub async fn blocked_query(analytics: &dyn AnalyticsAggregator) -> Reply {
    match analytics.tasks_summary().await {
        Ok(summary) if summary.blocked.is_empty() => respond::no_blocked_tasks(),
        Ok(summary) => respond::blocked_report(&summary.blocked),
        Err(e) => {
            warn!(err = %e, "blocked task query failed");
            respond::collaborator_failure(&e.to_string())
        }
    }
}

/// BusyUserQuery intent: render the workload report, or the "nobody is
/// busy" reply when no user has active tasks.
pub async fn busy_user_query(analytics: &dyn AnalyticsAggregator) -> Reply {
    match analytics.user_stats().await {
        Ok(stats) => match stats.most_busy_user.clone() {
            Some(busiest) => {
                let stats_json = serde_json::to_value(&stats).unwrap_or_default();
                respond::busy_report(&stats, &busiest, stats_json)
            }
            None => respond::no_busy_users(),
        },
        Err(e) => {
            warn!(err = %e, "user stats query failed");
            respond::collaborator_failure(&e.to_string())
        }
    }
}

/// General intent: a randomly chosen greeting. No collaborator calls.
pub fn general(picker: &dyn Picker) -> Reply {
    let index = picker.pick(respond::GREETINGS.len());
    respond::greeting(index)
}
