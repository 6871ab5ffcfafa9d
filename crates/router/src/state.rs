// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use mesh_engine::{FlowExecutionEngine, FlowStore};
use mesh_registry::{LivenessSupervisor, Registry};
use mesh_rpc::AgentRpcClient;
use std::sync::Arc;

/// Shared daemon context for every request handler.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<Registry>,
    pub supervisor: Arc<LivenessSupervisor>,
    pub flow_store: Arc<FlowStore>,
    pub engine: Arc<FlowExecutionEngine>,
    pub rpc: Arc<dyn AgentRpcClient>,
}
