pub mod analytics;
pub mod chat;
pub mod config;
pub mod ipc;
pub mod storage;
pub mod tasks;

use std::sync::Arc;

use chat::{ChatProcessor, Picker, ThreadRngPicker};
use config::DaemonConfig;
use storage::Storage;

/// Shared application state passed to every RPC handler.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<DaemonConfig>,
    pub storage: Arc<Storage>,
    /// The conversational command processor behind `chat.message`.
    pub chat: Arc<ChatProcessor>,
    pub started_at: std::time::Instant,
}

impl AppContext {
    /// Wire the chat processor to the SQLite-backed collaborators.
    pub fn new(config: Arc<DaemonConfig>, storage: Arc<Storage>) -> Self {
        Self::with_picker(config, storage, Arc::new(ThreadRngPicker))
    }

    /// Same as [`AppContext::new`] but with an explicit greeting picker, so
    /// tests can pin the fallback reply.
    pub fn with_picker(
        config: Arc<DaemonConfig>,
        storage: Arc<Storage>,
        picker: Arc<dyn Picker>,
    ) -> Self {
        let directory = Arc::new(tasks::TaskStorage::new(storage.pool()));
        let analytics = Arc::new(analytics::AnalyticsStorage::new(storage.pool()));
        let chat = Arc::new(ChatProcessor::new(directory, analytics, picker));
        Self {
            config,
            storage,
            chat,
            started_at: std::time::Instant::now(),
        }
    }
}
