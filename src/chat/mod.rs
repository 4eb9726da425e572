// SPDX-License-Identifier: MIT
//! Conversational command processor.
//!
//! Takes a free-text chat message, classifies what the user wants (create a
//! task, status summary, blocked work, busiest user, or none of those),
//! performs the matching query or mutation through the collaborator traits,
//! and synthesizes a structured reply with follow-up suggestions.
//!
//! The pipeline is normalize → classify → extract (creation only) →
//! dispatch → stamp. [`ChatProcessor::process_message`] is total: no
//! collaborator error escapes it — every failure becomes user-facing text.
//! The processor holds no state between invocations; each call fetches
//! fresh data from the collaborators.

pub mod extract;
pub mod handlers;
pub mod intent;
pub mod respond;

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::tasks::model::{Task, TaskStatus};
use crate::analytics::model::{TaskSummary, UserStats};
use intent::Intent;

// ─── Collaborator traits ──────────────────────────────────────────────────────

/// Mutation surface of the task store, as consumed by the chat processor.
#[async_trait]
pub trait TaskDirectory: Send + Sync {
    async fn create(&self, title: &str, description: &str, status: TaskStatus) -> Result<Task>;
}

/// Read surface of the analytics aggregator.
#[async_trait]
pub trait AnalyticsAggregator: Send + Sync {
    async fn tasks_summary(&self) -> Result<TaskSummary>;
    async fn user_stats(&self) -> Result<UserStats>;
}

/// Injectable randomness for the fallback greeting, so tests can pin the
/// choice.
pub trait Picker: Send + Sync {
    /// Return an index in `0..len`. Call sites guarantee `len > 0`.
    fn pick(&self, len: usize) -> usize;
}

/// Production picker backed by the thread-local RNG.
pub struct ThreadRngPicker;

impl Picker for ThreadRngPicker {
    fn pick(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

// ─── Wire types ───────────────────────────────────────────────────────────────

/// Optional conversation context tag. Accepted for forward compatibility;
/// not currently used to alter routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatContext {
    Tasks,
    General,
    Help,
}

/// Incoming chat message. `message` non-emptiness is validated at the
/// transport boundary.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessageInput {
    pub message: String,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub context: Option<ChatContext>,
}

/// Kind of side effect the processor performed for a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    TaskCreated,
    TaskUpdated,
    QueryExecuted,
}

/// Action metadata envelope attached to replies that touched a collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionTaken {
    #[serde(rename = "type")]
    pub action_type: ActionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// Structured chat reply.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponseOutput {
    pub response: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_taken: Option<ActionTaken>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
    pub timestamp: DateTime<Utc>,
}

// ─── Processor ────────────────────────────────────────────────────────────────

/// Stateless single-turn message → response transformer. Safe to share
/// across tasks; concurrency correctness rests on the collaborators.
pub struct ChatProcessor {
    directory: Arc<dyn TaskDirectory>,
    analytics: Arc<dyn AnalyticsAggregator>,
    picker: Arc<dyn Picker>,
}

impl ChatProcessor {
    pub fn new(
        directory: Arc<dyn TaskDirectory>,
        analytics: Arc<dyn AnalyticsAggregator>,
        picker: Arc<dyn Picker>,
    ) -> Self {
        Self {
            directory,
            analytics,
            picker,
        }
    }

    /// Process one chat message. Total: never returns an error — collaborator
    /// failures are folded into the reply text by the intent handlers.
    pub async fn process_message(&self, input: &ChatMessageInput) -> ChatResponseOutput {
        let normalized = intent::normalize(&input.message);
        let classified = intent::classify(&normalized);
        debug!(intent = ?classified, context = ?input.context, user_id = ?input.user_id, "chat dispatch");

        let reply = match classified {
            Intent::CreateTask => {
                handlers::create_task(self.directory.as_ref(), &input.message).await
            }
            Intent::StatusQuery => handlers::status_query(self.analytics.as_ref()).await,
            Intent::BlockedQuery => handlers::blocked_query(self.analytics.as_ref()).await,
            Intent::BusyUserQuery => handlers::busy_user_query(self.analytics.as_ref()).await,
            Intent::General => handlers::general(self.picker.as_ref()),
        };

        ChatResponseOutput {
            response: reply.response,
            action_taken: reply.action_taken,
            suggestions: reply.suggestions,
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thread_rng_picker_stays_in_range() {
        let picker = ThreadRngPicker;
        for _ in 0..100 {
            assert!(picker.pick(3) < 3);
        }
    }

    #[test]
    fn input_deserializes_camel_case() {
        let input: ChatMessageInput =
            serde_json::from_str(r#"{"message":"Hola","userId":7,"context":"tasks"}"#).unwrap();
        assert_eq!(input.message, "Hola");
        assert_eq!(input.user_id, Some(7));
        assert_eq!(input.context, Some(ChatContext::Tasks));
    }

    #[test]
    fn input_optionals_default_to_none() {
        let input: ChatMessageInput = serde_json::from_str(r#"{"message":"Hola"}"#).unwrap();
        assert!(input.user_id.is_none());
        assert!(input.context.is_none());
    }

    #[test]
    fn action_type_serializes_snake_case() {
        let json = serde_json::to_string(&ActionType::TaskCreated).unwrap();
        assert_eq!(json, "\"task_created\"");
    }

    #[test]
    fn output_omits_absent_fields() {
        let out = ChatResponseOutput {
            response: "hola".into(),
            action_taken: None,
            suggestions: None,
            timestamp: Utc::now(),
        };
        let json = serde_json::to_string(&out).unwrap();
        assert!(!json.contains("actionTaken"));
        assert!(!json.contains("suggestions"));
        assert!(json.contains("timestamp"));
    }
}
