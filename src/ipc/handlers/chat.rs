//! Chat RPC handler.

use crate::chat::ChatMessageInput;
use crate::AppContext;
use anyhow::{anyhow, Result};
use serde_json::Value;

/// `chat.message` — run one message through the conversational command
/// processor.
///
/// Params:
/// ```json
/// { "message": "Crear tarea \"Revisar código\"", "userId": 7, "context": "tasks" }
/// ```
///
/// Response:
/// ```json
/// {
///   "response":    "✅ ¡Tarea creada exitosamente! …",
///   "actionTaken": { "type": "task_created", "data": { … } },
///   "suggestions": [ "Asignar usuarios a esta tarea", … ],
///   "timestamp":   "2026-02-25T12:00:00Z"
/// }
/// ```
///
/// The processor itself is total; the only error this handler can return is
/// a params validation failure (empty or missing `message`).
pub async fn message(params: Value, ctx: &AppContext) -> Result<Value> {
    let input: ChatMessageInput = serde_json::from_value(params)
        .map_err(|e| anyhow!("invalid type for chat.message params: {e}"))?;
    if input.message.trim().is_empty() {
        return Err(anyhow!("missing field: message"));
    }

    let output = ctx.chat.process_message(&input).await;
    Ok(serde_json::to_value(&output)?)
}
