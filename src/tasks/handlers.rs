//! Task Directory RPC handlers.

use crate::AppContext;
use anyhow::{anyhow, Result};
use serde_json::{json, Value};

use super::model::TaskStatus;
use super::storage::TaskStorage;

fn task_storage(ctx: &AppContext) -> TaskStorage {
    TaskStorage::new(ctx.storage.pool())
}

fn require_str<'a>(params: &'a Value, key: &str) -> Result<&'a str> {
    params[key]
        .as_str()
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| anyhow!("missing field: {key}"))
}

fn parse_status(params: &Value, key: &str) -> Result<TaskStatus> {
    require_str(params, key)?
        .parse()
        .map_err(|e| anyhow!("invalid type for {key}: {e}"))
}

// ─── Task handlers ────────────────────────────────────────────────────────────

/// `task.create` — create a task.
pub async fn create(params: Value, ctx: &AppContext) -> Result<Value> {
    let title = require_str(&params, "title")?;
    let description = params["description"].as_str();
    let status = match params.get("status").and_then(Value::as_str) {
        Some(_) => parse_status(&params, "status")?,
        None => TaskStatus::Created,
    };

    let task = task_storage(ctx).create_task(title, description, status).await?;
    Ok(serde_json::to_value(&task)?)
}

/// `task.get` — get a task by ID, with its assignee names.
pub async fn get(params: Value, ctx: &AppContext) -> Result<Value> {
    let id = require_str(&params, "id")?;
    let storage = task_storage(ctx);
    let task = storage.get_task(id).await?;
    let assignees = storage.assignees_for(id).await?;
    Ok(json!({ "task": task, "assignees": assignees }))
}

/// `task.list` — list tasks with an optional status filter.
pub async fn list(params: Value, ctx: &AppContext) -> Result<Value> {
    let status = match params.get("status").and_then(Value::as_str) {
        Some(_) => Some(parse_status(&params, "status")?),
        None => None,
    };
    let storage = task_storage(ctx);
    let tasks = crate::storage::with_timeout(storage.list_tasks(status)).await?;
    Ok(json!({ "tasks": tasks }))
}

/// `task.updateStatus` — change a task's status.
pub async fn update_status(params: Value, ctx: &AppContext) -> Result<Value> {
    let id = require_str(&params, "id")?;
    let status = parse_status(&params, "status")?;
    let task = task_storage(ctx).update_status(id, status).await?;
    Ok(serde_json::to_value(&task)?)
}

/// `task.delete` — delete a task and its assignments.
pub async fn delete(params: Value, ctx: &AppContext) -> Result<Value> {
    let id = require_str(&params, "id")?;
    task_storage(ctx).delete_task(id).await?;
    Ok(json!({ "ok": true }))
}

/// `task.assign` — assign a user to a task.
pub async fn assign(params: Value, ctx: &AppContext) -> Result<Value> {
    let task_id = require_str(&params, "taskId")?;
    let user_id = require_str(&params, "userId")?;
    let assignment = task_storage(ctx).assign_user(task_id, user_id).await?;
    Ok(serde_json::to_value(&assignment)?)
}

// ─── User handlers ────────────────────────────────────────────────────────────

/// `user.create` — register a user.
pub async fn user_create(params: Value, ctx: &AppContext) -> Result<Value> {
    let name = require_str(&params, "name")?;
    let user = task_storage(ctx).create_user(name).await?;
    Ok(serde_json::to_value(&user)?)
}

/// `user.list` — list all users.
pub async fn user_list(_params: Value, ctx: &AppContext) -> Result<Value> {
    let users = task_storage(ctx).list_users().await?;
    Ok(json!({ "users": users }))
}
