//! Response synthesis — templated Spanish-primary reply text, emoji
//! tables, suggestion lists, and the completion-rate computation.

use chrono::DateTime;
use serde_json::Value;

use super::{ActionTaken, ActionType};
use crate::analytics::model::{BlockedTask, TaskSummary, UserStats};

/// A synthesized reply body. The orchestrator stamps the timestamp.
#[derive(Debug, Clone)]
pub struct Reply {
    pub response: String,
    pub action_taken: Option<ActionTaken>,
    pub suggestions: Option<Vec<String>>,
}

impl Reply {
    fn new(response: String) -> Self {
        Self {
            response,
            action_taken: None,
            suggestions: None,
        }
    }

    fn with_suggestions(mut self, suggestions: &[&str]) -> Self {
        self.suggestions = Some(suggestions.iter().map(|s| s.to_string()).collect());
        self
    }

    fn with_action(mut self, action_type: ActionType, data: Value) -> Self {
        self.action_taken = Some(ActionTaken {
            action_type,
            data: Some(data),
        });
        self
    }
}

// ─── Fixed text ───────────────────────────────────────────────────────────────

/// Description attached to every task created through the chat.
pub const CHAT_TASK_DESCRIPTION: &str = "Tarea creada desde el chat";

/// Celebratory reply when nothing is blocked. Tests key off this phrase.
pub const NO_BLOCKED_TEXT: &str =
    "🎉 ¡Excelente! No hay tareas bloqueadas en este momento.";

pub const NO_BUSY_USERS_TEXT: &str =
    "😌 No hay usuarios con tareas activas en este momento.";

/// Fallback greetings — one is chosen at random per message.
pub const GREETINGS: [&str; 3] = [
    "¡Hola! Soy tu asistente de tareas. Puedo crear tareas, resumir el estado del proyecto y decirte quién está más ocupado.",
    "¡Hola! ¿En qué puedo ayudarte hoy? Pregúntame por el estado del proyecto o pídeme crear una tarea.",
    "Aquí estoy para ayudarte con tus tareas. Prueba con \"resumen\" o \"crear tarea\".",
];

const CREATED_SUGGESTIONS: [&str; 3] = [
    "Asignar usuarios a esta tarea",
    "Cambiar el estado a 'En Progreso'",
    "Agregar una descripción más detallada",
];

const CLARIFY_SUGGESTIONS: [&str; 3] = [
    "Crear tarea \"Revisar documentación\"",
    "Nueva tarea: preparar la demo",
    "Add \"Fix login bug\"",
];

const STATUS_SUGGESTIONS: [&str; 3] = [
    "Ver tareas bloqueadas",
    "Saber quién está más ocupado",
    "Crear una tarea nueva",
];

const BLOCKED_SUGGESTIONS: [&str; 3] = [
    "Ver el estado general del proyecto",
    "Reasignar una tarea bloqueada",
    "Crear una tarea nueva",
];

const BUSY_SUGGESTIONS: [&str; 3] = [
    "Ver el estado general del proyecto",
    "Ver tareas bloqueadas",
    "Asignar una tarea a otro usuario",
];

const GENERAL_SUGGESTIONS: [&str; 4] = [
    "Crear una tarea nueva",
    "Ver el estado del proyecto",
    "Ver tareas bloqueadas",
    "Saber quién está más ocupado",
];

// ─── Display helpers ──────────────────────────────────────────────────────────

/// Emoji for a stored status string. Unknown strings get the generic clipboard.
pub fn status_emoji(status: &str) -> &'static str {
    match status {
        "created" => "📝",
        "in_progress" => "⚡",
        "blocked" => "🚫",
        "completed" => "✅",
        "cancelled" => "❌",
        _ => "📋",
    }
}

/// Spanish display label for a stored status string.
pub fn status_label(status: &str) -> &str {
    match status {
        "created" => "Creadas",
        "in_progress" => "En Progreso",
        "blocked" => "Bloqueadas",
        "completed" => "Completadas",
        "cancelled" => "Canceladas",
        other => other,
    }
}

/// Workload tier emoji: heavy (>3), moderate (>1), light.
pub fn workload_emoji(active_tasks: u64) -> &'static str {
    if active_tasks > 3 {
        "🔥"
    } else if active_tasks > 1 {
        "📋"
    } else {
        "✅"
    }
}

/// Percentage of completed tasks, rounded to the nearest integer.
/// Defined as 0 when there are no tasks at all.
pub fn completion_rate(completed: u64, total: u64) -> u64 {
    if total == 0 {
        return 0;
    }
    ((completed as f64 / total as f64) * 100.0).round() as u64
}

/// Localized short date (dd/mm/yyyy) from an RFC 3339 timestamp.
/// Falls back to the raw string if it does not parse.
fn short_date(rfc3339: &str) -> String {
    DateTime::parse_from_rfc3339(rfc3339)
        .map(|t| t.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|_| rfc3339.to_string())
}

// ─── Reply builders ───────────────────────────────────────────────────────────

/// Confirmation after a successful chat-driven task creation.
pub fn task_created(task_id: &str, title: &str, task_json: Value) -> Reply {
    let response = format!(
        "✅ ¡Tarea creada exitosamente!\n\n📋 **{title}**\n🆔 ID: {task_id}\n📊 Estado: Creada"
    );
    Reply::new(response)
        .with_action(ActionType::TaskCreated, task_json)
        .with_suggestions(&CREATED_SUGGESTIONS)
}

/// Clarifying reply when no title could be extracted. No collaborator call
/// was made, so there is no action metadata.
pub fn clarify_title() -> Reply {
    Reply::new(
        "🤔 Quiero crear esa tarea, pero necesito un título. Dímelo entre comillas o después de dos puntos, por ejemplo:"
            .to_string(),
    )
    .with_suggestions(&CLARIFY_SUGGESTIONS)
}

/// Apologetic reply embedding a collaborator failure's detail.
pub fn collaborator_failure(detail: &str) -> Reply {
    Reply::new(format!(
        "😔 Lo siento, algo salió mal al procesar tu solicitud: {detail}"
    ))
}

/// Project status report from a task summary.
pub fn status_report(summary: &TaskSummary, summary_json: Value) -> Reply {
    let mut response = format!("📊 **Resumen de Tareas**\n\nTotal: {} tareas\n", summary.total);
    for entry in &summary.by_status {
        response.push_str(&format!(
            "{} {}: {}\n",
            status_emoji(&entry.status),
            status_label(&entry.status),
            entry.count
        ));
    }

    let completed = summary
        .by_status
        .iter()
        .find(|entry| entry.status == "completed")
        .map(|entry| entry.count)
        .unwrap_or(0);
    let rate = completion_rate(completed, summary.total);
    response.push_str(&format!("\n🎯 Progreso: {rate}% completado"));

    Reply::new(response)
        .with_action(ActionType::QueryExecuted, summary_json)
        .with_suggestions(&STATUS_SUGGESTIONS)
}

/// Celebratory reply for an empty blocked list.
pub fn no_blocked_tasks() -> Reply {
    Reply::new(NO_BLOCKED_TEXT.to_string()).with_suggestions(&BLOCKED_SUGGESTIONS)
}

/// Enumeration of every blocked task, 1-based. Unbounded by design.
pub fn blocked_report(blocked: &[BlockedTask]) -> Reply {
    let mut response = format!("🚫 **Tareas Bloqueadas ({})**\n\n", blocked.len());
    for (i, task) in blocked.iter().enumerate() {
        response.push_str(&format!("{}. **{}**\n", i + 1, task.title));
        if let Some(description) = &task.description {
            response.push_str(&format!("   📝 {description}\n"));
        }
        if !task.assignees.is_empty() {
            response.push_str(&format!("   👥 Asignada a: {}\n", task.assignees.join(", ")));
        }
        response.push_str(&format!("   📅 Creada: {}\n\n", short_date(&task.created_at)));
    }

    let data = serde_json::json!({ "blockedTasks": blocked });
    Reply::new(response)
        .with_action(ActionType::QueryExecuted, data)
        .with_suggestions(&BLOCKED_SUGGESTIONS)
}

/// "No users with active tasks" reply.
pub fn no_busy_users() -> Reply {
    Reply::new(NO_BUSY_USERS_TEXT.to_string()).with_suggestions(&BUSY_SUGGESTIONS)
}

/// Workload report naming the busiest user, then every user by active-task
/// count descending (the aggregator's sort contract).
pub fn busy_report(stats: &UserStats, busiest: &str, stats_json: Value) -> Reply {
    let top_count = stats
        .tasks_per_user
        .first()
        .map(|u| u.active_tasks)
        .unwrap_or(0);
    let mut response = format!(
        "👑 **{busiest}** es quien tiene más tareas activas ({top_count})\n\n**Carga de trabajo:**\n"
    );
    for user in &stats.tasks_per_user {
        response.push_str(&format!(
            "{} {}: {} tareas\n",
            workload_emoji(user.active_tasks),
            user.name,
            user.active_tasks
        ));
    }

    Reply::new(response)
        .with_action(ActionType::QueryExecuted, stats_json)
        .with_suggestions(&BUSY_SUGGESTIONS)
}

/// Fallback greeting. `index` must be in `0..GREETINGS.len()`.
pub fn greeting(index: usize) -> Reply {
    Reply::new(GREETINGS[index].to_string()).with_suggestions(&GENERAL_SUGGESTIONS)
}
