// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wire-shape request/response bodies, kept separate from the core crates'
//! domain types so the HTTP surface can drift independently of storage and
//! engine internals.

use mesh_core::{AgentRecord, AgentStatus, ExecutionRecord, FlowAgentEntry, FlowDefinition};
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub struct RegisterResponse {
    pub name: String,
    pub status: AgentStatus,
}

#[derive(Serialize)]
pub struct AgentsListResponse {
    pub agents: Vec<AgentRecord>,
}

#[derive(Serialize)]
pub struct CleanupResponse {
    pub deleted_count: usize,
}

#[derive(Deserialize)]
pub struct RunRequest {
    pub agent_name: String,
    #[serde(default)]
    pub input: serde_json::Value,
}

#[derive(Serialize)]
pub struct RunResponse {
    pub run_id: String,
    pub status: &'static str,
    pub output: serde_json::Value,
}

#[derive(Deserialize)]
pub struct CreateFlowRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub agents: Vec<FlowAgentEntry>,
}

#[derive(Serialize)]
pub struct CreateFlowResponse {
    pub flow_id: String,
}

#[derive(Serialize)]
pub struct FlowsListResponse {
    pub flows: Vec<FlowDefinition>,
}

#[derive(Deserialize)]
pub struct ExecuteFlowRequest {
    #[serde(default)]
    pub input: serde_json::Value,
}

#[derive(Serialize)]
pub struct ExecuteFlowResponse {
    pub result: ExecutionRecord,
}

#[derive(Serialize)]
pub struct ExecutionsListResponse {
    pub executions: Vec<ExecutionRecord>,
}

#[derive(Serialize)]
pub struct ImportFlowResponse {
    pub flow_id: String,
    pub warnings: Vec<String>,
}

#[derive(Deserialize)]
pub struct ImportFlowRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub agents: Vec<mesh_core::FlowExportAgent>,
    #[serde(default)]
    pub overwrite_existing: bool,
    #[serde(default)]
    pub validate_agents: bool,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
