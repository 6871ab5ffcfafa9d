// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::dto::{RunRequest, RunResponse};
use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::State;
use axum::Json;
use mesh_core::IdGen;
use mesh_rpc::{AgentTarget, RpcMessage};

/// POST /runs
///
/// Single-agent invocation, outside of any flow. No retry on this path —
/// retries are a flow-engine property (§7).
pub async fn create(State(state): State<AppState>, Json(req): Json<RunRequest>) -> Result<Json<RunResponse>, ApiError> {
    if req.agent_name.trim().is_empty() {
        return Err(ApiError::BadRequest("missing or empty required field: agent_name".to_string()));
    }

    let record = state
        .registry
        .get(&req.agent_name)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("agent '{}' not found", req.agent_name)))?;

    let target = AgentTarget { base_url: record.base_url, auth_token: record.auth_token };
    let message = RpcMessage::new(req.input.to_string());
    let output = state
        .rpc
        .invoke(&target, &req.agent_name, vec![message])
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    let content = output.into_iter().next().map(|m| m.content).unwrap_or_default();
    let output = serde_json::from_str(&content).unwrap_or(serde_json::json!({ "content": content }));

    Ok(Json(RunResponse { run_id: mesh_core::UuidIdGen.next(), status: "completed", output }))
}

#[cfg(test)]
#[path = "runs_tests.rs"]
mod tests;
