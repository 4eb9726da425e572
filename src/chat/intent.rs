//! Message normalization and intent classification.
//!
//! Classification is a first-match-wins walk over an ordered rule table.
//! The table order is a contract: a message containing both a CreateTask
//! keyword and a StatusQuery keyword must classify as CreateTask. Matching
//! is substring containment on the lowercased message, not word-boundary —
//! "agregar" anywhere in the text triggers creation handling, even inside
//! another word.

/// The single classified purpose of an incoming chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    CreateTask,
    StatusQuery,
    BlockedQuery,
    BusyUserQuery,
    /// Catch-all — classification is total.
    General,
}

/// Ordered (intent, keywords) rules, highest priority first.
/// Keywords are bilingual (Spanish/English) and already lowercase.
const RULES: &[(Intent, &[&str])] = &[
    (
        Intent::CreateTask,
        &["crear", "create", "nueva tarea", "new task", "agregar", "add"],
    ),
    (
        Intent::StatusQuery,
        &[
            "estado", "status", "progreso", "progress", "cuántas", "how many", "resumen",
        ],
    ),
    (
        Intent::BlockedQuery,
        &["bloqueadas", "blocked", "bloqueada", "impedidas"],
    ),
    (
        Intent::BusyUserQuery,
        &["más tareas", "most tasks", "ocupado", "busy", "carga", "usuario"],
    ),
];

/// Case-fold a raw message for classification. No trimming — title
/// whitespace is handled during extraction instead.
pub fn normalize(raw: &str) -> String {
    raw.to_lowercase()
}

/// Classify a normalized message into exactly one intent.
pub fn classify(normalized: &str) -> Intent {
    for (intent, keywords) in RULES {
        if keywords.iter().any(|kw| normalized.contains(kw)) {
            return *intent;
        }
    }
    Intent::General
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify_raw(msg: &str) -> Intent {
        classify(&normalize(msg))
    }

    #[test]
    fn create_keywords_classify_as_create() {
        assert_eq!(classify_raw("Crear tarea \"algo\""), Intent::CreateTask);
        assert_eq!(classify_raw("new task: deploy"), Intent::CreateTask);
        assert_eq!(classify_raw("AGREGAR una cosa"), Intent::CreateTask);
    }

    #[test]
    fn status_keywords_classify_as_status() {
        assert_eq!(classify_raw("¿Cuál es el estado del proyecto?"), Intent::StatusQuery);
        assert_eq!(classify_raw("how many tasks are left"), Intent::StatusQuery);
        assert_eq!(classify_raw("dame un resumen"), Intent::StatusQuery);
    }

    #[test]
    fn blocked_and_busy_queries() {
        assert_eq!(classify_raw("tareas bloqueadas"), Intent::BlockedQuery);
        assert_eq!(classify_raw("what is blocked?"), Intent::BlockedQuery);
        assert_eq!(classify_raw("quién está más ocupado"), Intent::BusyUserQuery);
        assert_eq!(classify_raw("who is busy"), Intent::BusyUserQuery);
    }

    #[test]
    fn priority_create_beats_status() {
        // Contains both "crear" (CreateTask) and "estado" (StatusQuery).
        assert_eq!(
            classify_raw("crear una tarea sobre el estado del build"),
            Intent::CreateTask
        );
    }

    #[test]
    fn substring_containment_not_word_boundary() {
        // "agregar" embedded inside a longer token still matches.
        assert_eq!(classify_raw("desagregarlo todo"), Intent::CreateTask);
    }

    #[test]
    fn fallback_is_general() {
        assert_eq!(classify_raw("Hola"), Intent::General);
        assert_eq!(classify_raw(""), Intent::General);
    }

    #[test]
    fn classification_is_case_insensitive() {
        assert_eq!(classify_raw("TAREAS BLOQUEADAS"), Intent::BlockedQuery);
    }
}
