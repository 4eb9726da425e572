// SPDX-License-Identifier: MIT
//! Analytics RPC handlers.
//!
//! Dispatch entries (see the `dispatch` match in `ipc/mod.rs`):
//!
//! ```text
//! "analytics.summary"   => analytics::handlers::summary(params, ctx).await,
//! "analytics.userStats" => analytics::handlers::user_stats(params, ctx).await,
//! ```

use crate::storage::with_timeout;
use crate::AppContext;
use anyhow::Result;
use serde_json::Value;

use super::storage::AnalyticsStorage;

/// `analytics.summary` — cross-task summary.
///
/// Response:
/// ```json
/// {
///   "total":             12,
///   "byStatus":          [ { "status": "created", "count": 4 }, … ],
///   "blocked":           [ { "id": "…", "title": "…", "assignees": ["Ana"], … } ],
///   "recentlyCompleted": [ { "id": "…", "title": "…", … } ]
/// }
/// ```
pub async fn summary(_params: Value, ctx: &AppContext) -> Result<Value> {
    let storage = AnalyticsStorage::new(ctx.storage.pool());
    let summary = with_timeout(storage.get_tasks_summary()).await?;
    Ok(serde_json::to_value(&summary)?)
}

/// `analytics.userStats` — per-user active-task workload.
///
/// Response:
/// ```json
/// {
///   "totalUsers":   3,
///   "tasksPerUser": [ { "name": "Ana", "activeTasks": 5 }, … ],
///   "mostBusyUser": "Ana"
/// }
/// ```
pub async fn user_stats(_params: Value, ctx: &AppContext) -> Result<Value> {
    let storage = AnalyticsStorage::new(ctx.storage.pool());
    let stats = with_timeout(storage.get_user_stats()).await?;
    Ok(serde_json::to_value(&stats)?)
}
