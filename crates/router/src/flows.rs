// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::dto::{
    CreateFlowRequest, CreateFlowResponse, ExecuteFlowRequest, ExecuteFlowResponse, ExecutionsListResponse, FlowsListResponse,
    ImportFlowRequest, ImportFlowResponse,
};
use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use mesh_core::{FlowAgentEntry, FlowDefinition, FlowExport, FlowImport};
use mesh_engine::FlowImportOutcome;
use serde::Deserialize;

/// POST /flows
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateFlowRequest>,
) -> Result<(StatusCode, Json<CreateFlowResponse>), ApiError> {
    if req.name.trim().is_empty() {
        return Err(ApiError::BadRequest("missing or empty required field: name".to_string()));
    }
    let flow = state.flow_store.create_flow(req.name, req.description, req.agents, None).await?;
    Ok((StatusCode::CREATED, Json(CreateFlowResponse { flow_id: flow.flow_id.to_string() })))
}

/// GET /flows
pub async fn list(State(state): State<AppState>) -> Result<Json<FlowsListResponse>, ApiError> {
    let flows = state.flow_store.list_flows().await?;
    Ok(Json(FlowsListResponse { flows }))
}

/// GET /flows/{id}
pub async fn get(State(state): State<AppState>, Path(flow_id): Path<String>) -> Result<Json<FlowDefinition>, ApiError> {
    state
        .flow_store
        .get_flow(&flow_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("flow '{flow_id}' not found")))
}

/// DELETE /flows/{id}
pub async fn delete(State(state): State<AppState>, Path(flow_id): Path<String>) -> Result<(), ApiError> {
    let deleted = state.flow_store.delete_flow(&flow_id).await?;
    if !deleted {
        return Err(ApiError::NotFound(format!("flow '{flow_id}' not found")));
    }
    Ok(())
}

/// POST /flows/{id}/agents
pub async fn add_agent(
    State(state): State<AppState>,
    Path(flow_id): Path<String>,
    Json(entry): Json<FlowAgentEntry>,
) -> Result<Json<FlowDefinition>, ApiError> {
    let flow = state.flow_store.add_agent(&flow_id, entry).await?;
    Ok(Json(flow))
}

/// DELETE /flows/{id}/agents/{agent_name}
pub async fn remove_agent(
    State(state): State<AppState>,
    Path((flow_id, agent_name)): Path<(String, String)>,
) -> Result<Json<FlowDefinition>, ApiError> {
    let flow = state.flow_store.remove_agent(&flow_id, &agent_name).await?;
    Ok(Json(flow))
}

/// POST /flows/{id}/execute
pub async fn execute(
    State(state): State<AppState>,
    Path(flow_id): Path<String>,
    Json(req): Json<ExecuteFlowRequest>,
) -> Result<Json<ExecuteFlowResponse>, ApiError> {
    let result = state.engine.execute_flow(&flow_id, req.input).await?;
    Ok(Json(ExecuteFlowResponse { result }))
}

#[derive(Deserialize)]
pub struct ExecutionsQuery {
    #[serde(default = "default_limit")]
    limit: usize,
}

fn default_limit() -> usize {
    100
}

/// GET /flows/{id}/executions
pub async fn list_executions(
    State(state): State<AppState>,
    Path(flow_id): Path<String>,
    Query(query): Query<ExecutionsQuery>,
) -> Result<Json<ExecutionsListResponse>, ApiError> {
    let executions = state.flow_store.list_executions(&flow_id, query.limit).await?;
    Ok(Json(ExecutionsListResponse { executions }))
}

/// GET /flows/{id}/executions/{exec_id}
pub async fn get_execution(
    State(state): State<AppState>,
    Path((flow_id, execution_id)): Path<(String, String)>,
) -> Result<Json<mesh_core::ExecutionRecord>, ApiError> {
    state
        .flow_store
        .get_execution(&flow_id, &execution_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("execution '{execution_id}' not found")))
}

/// GET /flows/{id}/export
pub async fn export(State(state): State<AppState>, Path(flow_id): Path<String>) -> Result<Json<FlowExport>, ApiError> {
    let export = state.flow_store.export_flow(&flow_id).await?;
    Ok(Json(export))
}

/// POST /flows/import
pub async fn import(
    State(state): State<AppState>,
    Json(req): Json<ImportFlowRequest>,
) -> Result<(StatusCode, Json<ImportFlowResponse>), ApiError> {
    if req.name.trim().is_empty() {
        return Err(ApiError::BadRequest("missing or empty required field: name".to_string()));
    }

    let known_agent_names: Vec<String> = state.registry.list().await?.into_iter().map(|a| a.agent_name).collect();
    let import = FlowImport { name: req.name, description: req.description, agents: req.agents };
    let (flow, outcome, mut warnings) = state
        .flow_store
        .import_flow(import, req.overwrite_existing, req.validate_agents, &known_agent_names)
        .await?;

    if outcome == FlowImportOutcome::Replaced {
        warnings.push("an existing flow with this name was replaced".to_string());
    }
    Ok((StatusCode::CREATED, Json(ImportFlowResponse { flow_id: flow.flow_id.to_string(), warnings })))
}

#[cfg(test)]
#[path = "flows_tests.rs"]
mod tests;
