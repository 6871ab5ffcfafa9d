// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::dto::{AgentsListResponse, CleanupResponse, RegisterResponse};
use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::Json;
use mesh_core::{AgentRecord, AgentRegistration, AgentStatus};
use mesh_registry::RegistryError;
use mesh_rpc::AgentTarget;
use tracing::{info, warn};

/// POST /platform/agents/register
///
/// Runs the verify-and-supervise handshake (§4.3): insert, one-shot probe,
/// then either spawn a prober or roll back the insert.
pub async fn register(State(state): State<AppState>, Json(registration): Json<AgentRegistration>) -> Result<Json<RegisterResponse>, ApiError> {
    let name = registration.agent_name.clone();

    let record = match state.registry.register(registration.clone()).await {
        Ok(record) => record,
        Err(RegistryError::AlreadyExists(_)) if !state.supervisor.has_prober(&name) => {
            // Stale record from before a restart: re-register with fresh data.
            state.registry.force_register(registration).await?
        }
        Err(e) => return Err(e.into()),
    };

    let target = AgentTarget { base_url: record.base_url.clone(), auth_token: record.auth_token.clone() };
    if !state.rpc.probe_registration(&target).await {
        let _ = state.registry.delete(&name).await;
        warn!(agent = %name, "registration verification failed, record rolled back");
        return Err(ApiError::BadRequest(format!("verification failed for agent '{name}'")));
    }

    state.supervisor.spawn(&name, target);
    info!(agent = %name, "agent registered and prober spawned");
    Ok(Json(RegisterResponse { name, status: AgentStatus::Active }))
}

/// DELETE /platform/agents/{name}
pub async fn delete(State(state): State<AppState>, Path(name): Path<String>) -> Result<(), ApiError> {
    state.supervisor.cancel(&name);
    let deleted = state.registry.delete(&name).await?;
    if !deleted {
        return Err(ApiError::NotFound(format!("agent '{name}' not found")));
    }
    Ok(())
}

/// DELETE /platform/agents/cleanup
pub async fn cleanup(State(state): State<AppState>) -> Result<Json<CleanupResponse>, ApiError> {
    state.supervisor.cancel_all();
    let deleted_count = state.registry.cleanup_all().await?;
    Ok(Json(CleanupResponse { deleted_count }))
}

/// GET /agents
pub async fn list(State(state): State<AppState>) -> Result<Json<AgentsListResponse>, ApiError> {
    let agents = state.registry.list().await?;
    Ok(Json(AgentsListResponse { agents }))
}

/// GET /agents/{name}
pub async fn get(State(state): State<AppState>, Path(name): Path<String>) -> Result<Json<AgentRecord>, ApiError> {
    state
        .registry
        .get(&name)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("agent '{name}' not found")))
}

#[cfg(test)]
#[path = "agents_tests.rs"]
mod tests;
