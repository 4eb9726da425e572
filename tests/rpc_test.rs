//! JSON-RPC dispatch tests driven through `ipc::dispatch_text`, end to end
//! against a real SQLite database in a temp directory.

use std::sync::Arc;

use serde_json::{json, Value};
use tempfile::TempDir;

use taskdeskd::chat::Picker;
use taskdeskd::{config::DaemonConfig, storage::Storage, AppContext};

struct FirstPicker;

impl Picker for FirstPicker {
    fn pick(&self, _len: usize) -> usize {
        0
    }
}

async fn make_ctx(dir: &TempDir) -> Arc<AppContext> {
    let config = Arc::new(DaemonConfig::new(
        Some(0),
        Some(dir.path().to_path_buf()),
        Some("error".to_string()),
        None,
    ));
    let storage = Arc::new(Storage::new(dir.path()).await.unwrap());
    Arc::new(AppContext::with_picker(config, storage, Arc::new(FirstPicker)))
}

async fn call(ctx: &AppContext, method: &str, params: Value) -> Value {
    let req = json!({ "jsonrpc": "2.0", "id": 1, "method": method, "params": params });
    let raw = taskdeskd::ipc::dispatch_text(&req.to_string(), ctx).await;
    serde_json::from_str(&raw).unwrap()
}

#[tokio::test]
async fn ping_pongs() {
    let dir = TempDir::new().unwrap();
    let ctx = make_ctx(&dir).await;
    let resp = call(&ctx, "daemon.ping", Value::Null).await;
    assert_eq!(resp["result"]["pong"], true);
}

#[tokio::test]
async fn unknown_method_maps_to_method_not_found() {
    let dir = TempDir::new().unwrap();
    let ctx = make_ctx(&dir).await;
    let resp = call(&ctx, "nope.nothing", Value::Null).await;
    assert_eq!(resp["error"]["code"], -32601);
}

#[tokio::test]
async fn malformed_json_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let ctx = make_ctx(&dir).await;
    let raw = taskdeskd::ipc::dispatch_text("{not json", &ctx).await;
    let resp: Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(resp["error"]["code"], -32700);
}

#[tokio::test]
async fn wrong_jsonrpc_version_is_invalid_request() {
    let dir = TempDir::new().unwrap();
    let ctx = make_ctx(&dir).await;
    let req = json!({ "jsonrpc": "1.0", "id": 1, "method": "daemon.ping" });
    let raw = taskdeskd::ipc::dispatch_text(&req.to_string(), &ctx).await;
    let resp: Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(resp["error"]["code"], -32600);
}

#[tokio::test]
async fn task_crud_over_rpc() {
    let dir = TempDir::new().unwrap();
    let ctx = make_ctx(&dir).await;

    let created = call(&ctx, "task.create", json!({ "title": "Deploy", "description": "v2" })).await;
    let id = created["result"]["id"].as_str().unwrap().to_string();
    assert_eq!(created["result"]["status"], "created");

    let moved = call(&ctx, "task.updateStatus", json!({ "id": id, "status": "in_progress" })).await;
    assert_eq!(moved["result"]["status"], "in_progress");

    let listed = call(&ctx, "task.list", json!({ "status": "in_progress" })).await;
    assert_eq!(listed["result"]["tasks"].as_array().unwrap().len(), 1);

    let deleted = call(&ctx, "task.delete", json!({ "id": id })).await;
    assert_eq!(deleted["result"]["ok"], true);

    let missing = call(&ctx, "task.get", json!({ "id": id })).await;
    assert_eq!(missing["error"]["code"], -32001);
}

#[tokio::test]
async fn task_create_without_title_is_invalid_params() {
    let dir = TempDir::new().unwrap();
    let ctx = make_ctx(&dir).await;
    let resp = call(&ctx, "task.create", json!({ "description": "no title" })).await;
    assert_eq!(resp["error"]["code"], -32602);
}

#[tokio::test]
async fn task_create_with_bad_status_is_invalid_params() {
    let dir = TempDir::new().unwrap();
    let ctx = make_ctx(&dir).await;
    let resp = call(&ctx, "task.create", json!({ "title": "t", "status": "archived" })).await;
    assert_eq!(resp["error"]["code"], -32602);
}

#[tokio::test]
async fn chat_message_creates_a_real_task() {
    let dir = TempDir::new().unwrap();
    let ctx = make_ctx(&dir).await;

    let resp = call(
        &ctx,
        "chat.message",
        json!({ "message": "Crear tarea \"Revisar código\"" }),
    )
    .await;

    assert_eq!(resp["result"]["actionTaken"]["type"], "task_created");
    assert!(resp["result"]["response"]
        .as_str()
        .unwrap()
        .contains("Revisar código"));

    // The task really landed in the directory.
    let listed = call(&ctx, "task.list", Value::Null).await;
    let tasks = listed["result"]["tasks"].as_array().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["title"], "Revisar código");
}

#[tokio::test]
async fn chat_message_requires_nonempty_message() {
    let dir = TempDir::new().unwrap();
    let ctx = make_ctx(&dir).await;
    let resp = call(&ctx, "chat.message", json!({ "message": "   " })).await;
    assert_eq!(resp["error"]["code"], -32602);
}

#[tokio::test]
async fn chat_status_query_reflects_database_state() {
    let dir = TempDir::new().unwrap();
    let ctx = make_ctx(&dir).await;

    call(&ctx, "task.create", json!({ "title": "a" })).await;
    call(&ctx, "task.create", json!({ "title": "b", "status": "completed" })).await;

    let resp = call(&ctx, "chat.message", json!({ "message": "dame un resumen" })).await;
    let text = resp["result"]["response"].as_str().unwrap();
    assert!(text.contains("Total: 2 tareas"));
    assert!(text.contains("50% completado"));
}

#[tokio::test]
async fn analytics_summary_over_rpc() {
    let dir = TempDir::new().unwrap();
    let ctx = make_ctx(&dir).await;

    call(&ctx, "task.create", json!({ "title": "stuck", "status": "blocked" })).await;
    let resp = call(&ctx, "analytics.summary", Value::Null).await;

    assert_eq!(resp["result"]["total"], 1);
    assert_eq!(resp["result"]["blocked"][0]["title"], "stuck");
}
