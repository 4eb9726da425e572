// SPDX-License-Identifier: MIT
//! Analytics Aggregator — on-demand cross-task and per-user summaries.

pub mod handlers;
pub mod model;
pub mod storage;

pub use storage::AnalyticsStorage;
