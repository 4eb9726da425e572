//! Daemon-level RPC handlers.

use crate::AppContext;
use anyhow::Result;
use serde_json::{json, Value};

/// `daemon.ping` — liveness check.
pub async fn ping(_params: Value, _ctx: &AppContext) -> Result<Value> {
    Ok(json!({ "pong": true, "version": env!("CARGO_PKG_VERSION") }))
}

/// `daemon.status` — uptime and basic configuration.
pub async fn status(_params: Value, ctx: &AppContext) -> Result<Value> {
    Ok(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "uptimeSecs": ctx.started_at.elapsed().as_secs(),
        "port": ctx.config.port,
    }))
}
