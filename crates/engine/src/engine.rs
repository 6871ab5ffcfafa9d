// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::flow_store::{FlowStore, FlowStoreError};
use futures::future::join_all;
use mesh_core::{AgentResult, AgentResultStatus, Clock, ExecutionRecord, ExecutionStatus};
use mesh_registry::{Registry, RegistryError};
use mesh_rpc::{AgentRpcClient, AgentTarget, RpcMessage};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Tunables for per-node retry.
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    pub retry_count: u32,
    pub retry_delay: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            retry_count: 3,
            retry_delay: Duration::from_secs(1),
        }
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("flow '{0}' not found")]
    FlowNotFound(String),
    #[error("flow is not ready: required agent '{0}' is unreachable")]
    FlowNotReady(String),
    #[error("flow has no start agents")]
    NoStartAgents,
    #[error("circular or missing dependency among nodes: {0:?}")]
    CircularOrMissingDependency(Vec<String>),
    #[error("required agent '{0}' failed")]
    RequiredAgentFailed(String),
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),
    #[error("flow store error: {0}")]
    FlowStore(#[from] FlowStoreError),
}

/// Executes a flow's DAG of agents, one wave of ready nodes at a time.
pub struct FlowExecutionEngine {
    flow_store: Arc<FlowStore>,
    registry: Arc<Registry>,
    rpc: Arc<dyn AgentRpcClient>,
    clock: Arc<dyn Clock>,
    config: EngineConfig,
}

impl FlowExecutionEngine {
    pub fn new(
        flow_store: Arc<FlowStore>,
        registry: Arc<Registry>,
        rpc: Arc<dyn AgentRpcClient>,
        clock: Arc<dyn Clock>,
        config: EngineConfig,
    ) -> Self {
        Self { flow_store, registry, rpc, clock, config }
    }

    pub async fn execute_flow(&self, flow_id: &str, input_data: serde_json::Value) -> Result<ExecutionRecord, EngineError> {
        let flow = self
            .flow_store
            .get_flow(flow_id)
            .await?
            .ok_or_else(|| EngineError::FlowNotFound(flow_id.to_string()))?;

        let mut execution = self.flow_store.create_execution(flow_id, input_data.clone()).await?;
        execution.status = ExecutionStatus::Running;
        self.flow_store.persist_execution(flow_id, &execution).await?;

        // Phase 1: readiness check. Only required nodes are probed.
        for node in &flow.agents {
            if !node.required {
                continue;
            }
            let Some(record) = self.registry.get(&node.agent_name).await? else {
                return self.fail(flow_id, execution, EngineError::FlowNotReady(node.agent_name.clone())).await;
            };
            let target = AgentTarget { base_url: record.base_url, auth_token: record.auth_token };
            if !self.rpc.probe(&target).await {
                return self.fail(flow_id, execution, EngineError::FlowNotReady(node.agent_name.clone())).await;
            }
        }

        // Phase 2: DAG scheduling. The start set is the literal zero-dependency
        // nodes, checked once before any wave runs — distinct from the
        // ready-set loop below, which can also go empty mid-schedule (a cycle
        // reachable only after the start wave completes) and reports that as
        // CircularOrMissingDependency instead.
        if flow.start_agents().is_empty() {
            return self.fail(flow_id, execution, EngineError::NoStartAgents).await;
        }

        let mut completed: HashSet<String> = HashSet::new();
        let mut results: HashMap<String, serde_json::Value> = HashMap::new();
        let mut wave = self.ready_set(&flow, &completed);

        loop {
            let mut wave_inputs = Vec::with_capacity(wave.len());
            for name in &wave {
                let Some(node) = flow.agent(name) else { continue };
                let input = self.compose_input(&input_data, node, &results);
                wave_inputs.push((node.clone(), input));
            }

            let outcomes = join_all(wave_inputs.into_iter().map(|(node, input)| {
                let rpc = self.rpc.clone();
                let registry = self.registry.clone();
                let config = self.config;
                async move {
                    let outcome = run_node_with_retry(&*rpc, &registry, &node.agent_name, input, config).await;
                    (node, outcome)
                }
            }))
            .await;

            for (node, outcome) in outcomes {
                self.flow_store
                    .record_agent_result(flow_id, execution.execution_id.as_str(), &node.agent_name, outcome.result.clone())
                    .await?;
                execution.agent_results.insert(node.agent_name.clone(), outcome.result.clone());

                match outcome.result.status {
                    AgentResultStatus::Completed => {
                        results.insert(node.agent_name.clone(), outcome.result.output.clone());
                        completed.insert(node.agent_name.clone());
                    }
                    AgentResultStatus::Failed if node.required => {
                        return self
                            .fail(flow_id, execution, EngineError::RequiredAgentFailed(node.agent_name.clone()))
                            .await;
                    }
                    AgentResultStatus::Failed => {
                        results.insert(node.agent_name.clone(), serde_json::json!({}));
                        completed.insert(node.agent_name.clone());
                    }
                }
            }

            if completed.len() == flow.agents.len() {
                break;
            }

            let ready = self.ready_set(&flow, &completed);
            if ready.is_empty() {
                let stuck: Vec<String> = flow
                    .agents
                    .iter()
                    .filter(|node| !completed.contains(&node.agent_name))
                    .map(|node| node.agent_name.clone())
                    .collect();
                return self.fail(flow_id, execution, EngineError::CircularOrMissingDependency(stuck)).await;
            }

            wave = ready;
        }

        let terminals = flow.terminal_agents();
        let output_data = match terminals.as_slice() {
            [] => serde_json::json!({}),
            [only] => results.get(*only).cloned().unwrap_or(serde_json::json!({})),
            many => {
                let map: serde_json::Map<String, serde_json::Value> = many
                    .iter()
                    .map(|name| (name.to_string(), results.get(*name).cloned().unwrap_or(serde_json::json!({}))))
                    .collect();
                serde_json::Value::Object(map)
            }
        };

        execution.status = ExecutionStatus::Completed;
        execution.output_data = output_data;
        execution.completed_at = Some(self.clock.now());
        self.flow_store.persist_execution(flow_id, &execution).await?;
        Ok(execution)
    }

    /// Nodes not yet completed whose every *required* upstream is already
    /// completed. Optional upstreams — whether pending or unknown to the
    /// flow — never block readiness; this racy-by-design behavior is
    /// preserved deliberately rather than "fixed".
    fn ready_set(&self, flow: &mesh_core::FlowDefinition, completed: &HashSet<String>) -> Vec<String> {
        flow.agents
            .iter()
            .filter(|node| !completed.contains(&node.agent_name))
            .filter(|node| {
                node.upstream_agents
                    .iter()
                    .filter(|up| flow.agent(up).map(|u| u.required).unwrap_or(false))
                    .all(|up| completed.contains(up.as_str()))
            })
            .map(|node| node.agent_name.clone())
            .collect()
    }

    fn compose_input(
        &self,
        flow_input: &serde_json::Value,
        node: &mesh_core::FlowAgentEntry,
        results: &HashMap<String, serde_json::Value>,
    ) -> serde_json::Value {
        match node.upstream_agents.as_slice() {
            [] => flow_input.clone(),
            [single] => results.get(single).cloned().unwrap_or(serde_json::json!({})),
            many => {
                let map: serde_json::Map<String, serde_json::Value> = many
                    .iter()
                    .map(|name| (name.clone(), results.get(name).cloned().unwrap_or(serde_json::json!({}))))
                    .collect();
                serde_json::Value::Object(map)
            }
        }
    }

    async fn fail(&self, flow_id: &str, mut execution: ExecutionRecord, error: EngineError) -> Result<ExecutionRecord, EngineError> {
        execution.status = ExecutionStatus::Failed;
        execution.error = Some(error.to_string());
        execution.completed_at = Some(self.clock.now());
        self.flow_store.persist_execution(flow_id, &execution).await?;
        Err(error)
    }
}

struct NodeOutcome {
    result: AgentResult,
}

async fn run_node_with_retry(
    rpc: &dyn AgentRpcClient,
    registry: &Registry,
    agent_name: &str,
    input: serde_json::Value,
    config: EngineConfig,
) -> NodeOutcome {
    let target = match registry.get(agent_name).await {
        Ok(Some(record)) => AgentTarget { base_url: record.base_url, auth_token: record.auth_token },
        _ => {
            return NodeOutcome {
                result: AgentResult {
                    status: AgentResultStatus::Failed,
                    output: serde_json::json!({}),
                    error: Some(format!("agent '{agent_name}' not found in registry")),
                    attempts: 1,
                },
            }
        }
    };

    let message = RpcMessage::new(input.to_string());
    let mut last_error = String::new();
    for attempt in 1..=config.retry_count {
        match rpc.invoke(&target, agent_name, vec![message.clone()]).await {
            Ok(output) => {
                let content = output.into_iter().next().map(|m| m.content).unwrap_or_default();
                let parsed = serde_json::from_str(&content).unwrap_or(serde_json::json!({ "content": content }));
                return NodeOutcome {
                    result: AgentResult { status: AgentResultStatus::Completed, output: parsed, error: None, attempts: attempt },
                };
            }
            Err(e) => {
                last_error = e.to_string();
                if attempt < config.retry_count {
                    tokio::time::sleep(config.retry_delay).await;
                }
            }
        }
    }

    NodeOutcome {
        result: AgentResult {
            status: AgentResultStatus::Failed,
            output: serde_json::json!({}),
            error: Some(last_error),
            attempts: config.retry_count,
        },
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
