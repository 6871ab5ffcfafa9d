// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::keys::{execution_hash, executions_list, flow_hash, FLOWS_SET, MAX_EXECUTIONS_PER_FLOW};
use mesh_core::{
    AgentResult, Clock, ExecutionId, ExecutionRecord, ExecutionStatus, FlowAgentEntry, FlowDefinition,
    FlowExport, FlowExportAgent, FlowExportMetadata, FlowId, FlowImport, IdGen,
};
use mesh_store::{Store, StoreError};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum FlowStoreError {
    #[error("flow name '{0}' is already in use")]
    NameConflict(String),
    #[error("flow '{0}' not found")]
    FlowNotFound(String),
    #[error("execution '{0}' not found")]
    ExecutionNotFound(String),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("stored flow record for '{0}' is corrupt")]
    Corrupt(String),
}

/// Outcome of [`FlowStore::import_flow`]: whether an existing flow was
/// replaced, so the router can pick the right HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowImportOutcome {
    Created,
    Replaced,
}

/// Flow and execution CRUD against the abstract [`Store`].
pub struct FlowStore {
    store: Arc<dyn Store>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGen>,
}

const PLATFORM_VERSION: &str = env!("CARGO_PKG_VERSION");

impl FlowStore {
    pub fn new(store: Arc<dyn Store>, clock: Arc<dyn Clock>, ids: Arc<dyn IdGen>) -> Self {
        Self { store, clock, ids }
    }

    fn flow_to_fields(flow: &FlowDefinition) -> Result<HashMap<String, serde_json::Value>, FlowStoreError> {
        match serde_json::to_value(flow) {
            Ok(serde_json::Value::Object(map)) => Ok(map.into_iter().collect()),
            _ => Err(FlowStoreError::Corrupt(flow.flow_id.to_string())),
        }
    }

    fn fields_to_flow(flow_id: &str, fields: HashMap<String, serde_json::Value>) -> Result<FlowDefinition, FlowStoreError> {
        let value = serde_json::Value::Object(fields.into_iter().collect());
        serde_json::from_value(value).map_err(|_| FlowStoreError::Corrupt(flow_id.to_string()))
    }

    fn execution_to_fields(record: &ExecutionRecord) -> Result<HashMap<String, serde_json::Value>, FlowStoreError> {
        match serde_json::to_value(record) {
            Ok(serde_json::Value::Object(map)) => Ok(map.into_iter().collect()),
            _ => Err(FlowStoreError::Corrupt(record.execution_id.to_string())),
        }
    }

    fn fields_to_execution(id: &str, fields: HashMap<String, serde_json::Value>) -> Result<ExecutionRecord, FlowStoreError> {
        let value = serde_json::Value::Object(fields.into_iter().collect());
        serde_json::from_value(value).map_err(|_| FlowStoreError::Corrupt(id.to_string()))
    }

    async fn name_in_use(&self, name: &str) -> Result<bool, FlowStoreError> {
        for flow in self.list_flows().await? {
            if flow.name == name {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Creates a new flow. Enforces name uniqueness directly, independent of
    /// the import path.
    pub async fn create_flow(
        &self,
        name: String,
        description: String,
        agents: Vec<FlowAgentEntry>,
        imported_from: Option<String>,
    ) -> Result<FlowDefinition, FlowStoreError> {
        if self.name_in_use(&name).await? {
            return Err(FlowStoreError::NameConflict(name));
        }

        let now = self.clock.now();
        let flow = FlowDefinition {
            flow_id: FlowId::new(self.ids.next()),
            name,
            description,
            created_at: now,
            updated_at: now,
            imported_from,
            agents,
        };
        let fields = Self::flow_to_fields(&flow)?;
        self.store.hash_set(&flow_hash(flow.flow_id.as_str()), fields).await?;
        self.store.set_add(FLOWS_SET, flow.flow_id.as_str()).await?;
        Ok(flow)
    }

    pub async fn get_flow(&self, flow_id: &str) -> Result<Option<FlowDefinition>, FlowStoreError> {
        match self.store.hash_get(&flow_hash(flow_id)).await? {
            Some(fields) if !fields.is_empty() => Ok(Some(Self::fields_to_flow(flow_id, fields)?)),
            _ => Ok(None),
        }
    }

    pub async fn list_flows(&self) -> Result<Vec<FlowDefinition>, FlowStoreError> {
        let ids = self.store.set_members(FLOWS_SET).await?;
        let mut flows = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(flow) = self.get_flow(&id).await? {
                flows.push(flow);
            }
        }
        Ok(flows)
    }

    /// Deletes a flow and every one of its executions.
    pub async fn delete_flow(&self, flow_id: &str) -> Result<bool, FlowStoreError> {
        let execution_ids = self.store.list_range(&executions_list(flow_id), 0, None).await?;
        for id in execution_ids {
            if let Some(id) = id.as_str() {
                self.store.hash_delete(&execution_hash(flow_id, id)).await?;
            }
        }
        self.store.list_delete(&executions_list(flow_id)).await?;

        let deleted = self.store.hash_delete(&flow_hash(flow_id)).await?;
        self.store.set_remove(FLOWS_SET, flow_id).await?;
        Ok(deleted)
    }

    pub async fn add_agent(&self, flow_id: &str, entry: FlowAgentEntry) -> Result<FlowDefinition, FlowStoreError> {
        let mut flow = self.get_flow(flow_id).await?.ok_or_else(|| FlowStoreError::FlowNotFound(flow_id.to_string()))?;
        flow.agents.retain(|a| a.agent_name != entry.agent_name);
        flow.agents.push(entry);
        flow.updated_at = self.clock.now();
        let fields = Self::flow_to_fields(&flow)?;
        self.store.hash_set(&flow_hash(flow_id), fields).await?;
        Ok(flow)
    }

    pub async fn remove_agent(&self, flow_id: &str, agent_name: &str) -> Result<FlowDefinition, FlowStoreError> {
        let mut flow = self.get_flow(flow_id).await?.ok_or_else(|| FlowStoreError::FlowNotFound(flow_id.to_string()))?;
        flow.agents.retain(|a| a.agent_name != agent_name);
        flow.updated_at = self.clock.now();
        let fields = Self::flow_to_fields(&flow)?;
        self.store.hash_set(&flow_hash(flow_id), fields).await?;
        Ok(flow)
    }

    pub async fn export_flow(&self, flow_id: &str) -> Result<FlowExport, FlowStoreError> {
        let flow = self.get_flow(flow_id).await?.ok_or_else(|| FlowStoreError::FlowNotFound(flow_id.to_string()))?;
        let agents: Vec<FlowExportAgent> = flow
            .agents
            .iter()
            .map(|a| FlowExportAgent {
                agent_name: a.agent_name.clone(),
                upstream_agents: a.upstream_agents.clone(),
                required: a.required,
                description: a.description.clone(),
            })
            .collect();
        Ok(FlowExport {
            name: flow.name.clone(),
            description: flow.description.clone(),
            agents,
            metadata: FlowExportMetadata {
                exported_at: self.clock.now(),
                platform_version: PLATFORM_VERSION.to_string(),
                agent_count: flow.agents.len(),
                original_flow_id: flow.flow_id.to_string(),
            },
        })
    }

    /// Imports a flow per the overwrite/collision matrix in §4.5. Returns any
    /// per-agent validation warnings alongside the created flow so callers
    /// can surface them rather than just logging them.
    pub async fn import_flow(
        &self,
        import: FlowImport,
        overwrite_existing: bool,
        validate_agents: bool,
        known_agent_names: &[String],
    ) -> Result<(FlowDefinition, FlowImportOutcome, Vec<String>), FlowStoreError> {
        let existing = self.list_flows().await?.into_iter().find(|f| f.name == import.name);

        let outcome = match (&existing, overwrite_existing) {
            (Some(_), false) => return Err(FlowStoreError::NameConflict(import.name)),
            (Some(existing), true) => {
                self.delete_flow(existing.flow_id.as_str()).await?;
                FlowImportOutcome::Replaced
            }
            (None, _) => FlowImportOutcome::Created,
        };

        let mut warnings = Vec::new();
        if validate_agents {
            for entry in &import.agents {
                if !known_agent_names.iter().any(|n| n == &entry.agent_name) {
                    let message = format!("agent '{}' is not currently registered", entry.agent_name);
                    warn!(agent_name = %entry.agent_name, "imported flow references unknown agent");
                    warnings.push(message);
                }
            }
        }

        let agents = import
            .agents
            .into_iter()
            .map(|a| FlowAgentEntry {
                agent_name: a.agent_name,
                upstream_agents: a.upstream_agents,
                required: a.required,
                description: a.description,
                added_at: String::new(),
            })
            .collect();
        let flow = self
            .create_flow(import.name, import.description, agents, Some("json_import".to_string()))
            .await?;
        Ok((flow, outcome, warnings))
    }

    pub async fn create_execution(&self, flow_id: &str, input_data: serde_json::Value) -> Result<ExecutionRecord, FlowStoreError> {
        if self.get_flow(flow_id).await?.is_none() {
            return Err(FlowStoreError::FlowNotFound(flow_id.to_string()));
        }
        let record = ExecutionRecord::new(ExecutionId::new(self.ids.next()), FlowId::new(flow_id), input_data, self.clock.now());
        self.persist_execution(flow_id, &record).await?;

        self.store
            .list_push_left(&executions_list(flow_id), serde_json::Value::String(record.execution_id.to_string()))
            .await?;
        self.store.list_trim(&executions_list(flow_id), MAX_EXECUTIONS_PER_FLOW).await?;
        Ok(record)
    }

    pub async fn persist_execution(&self, flow_id: &str, record: &ExecutionRecord) -> Result<(), FlowStoreError> {
        let fields = Self::execution_to_fields(record)?;
        self.store.hash_set(&execution_hash(flow_id, record.execution_id.as_str()), fields).await?;
        Ok(())
    }

    pub async fn get_execution(&self, flow_id: &str, execution_id: &str) -> Result<Option<ExecutionRecord>, FlowStoreError> {
        match self.store.hash_get(&execution_hash(flow_id, execution_id)).await? {
            Some(fields) if !fields.is_empty() => Ok(Some(Self::fields_to_execution(execution_id, fields)?)),
            _ => Ok(None),
        }
    }

    /// Most recent `limit` executions for a flow, newest first.
    pub async fn list_executions(&self, flow_id: &str, limit: usize) -> Result<Vec<ExecutionRecord>, FlowStoreError> {
        let ids = self.store.list_range(&executions_list(flow_id), 0, Some(limit.saturating_sub(1))).await?;
        let mut records = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(id) = id.as_str() {
                if let Some(record) = self.get_execution(flow_id, id).await? {
                    records.push(record);
                }
            }
        }
        Ok(records)
    }

    pub async fn record_agent_result(
        &self,
        flow_id: &str,
        execution_id: &str,
        agent_name: &str,
        result: AgentResult,
    ) -> Result<(), FlowStoreError> {
        let mut record = self
            .get_execution(flow_id, execution_id)
            .await?
            .ok_or_else(|| FlowStoreError::ExecutionNotFound(execution_id.to_string()))?;
        record.agent_results.insert(agent_name.to_string(), result);
        self.persist_execution(flow_id, &record).await
    }

    /// Startup reconciliation: any execution left `running` across a crash
    /// is transitioned to `failed` with an "abandoned" error. Does not touch
    /// already-terminal executions.
    pub async fn sweep_orphaned_executions(&self) -> Result<usize, FlowStoreError> {
        let mut swept = 0;
        for flow in self.list_flows().await? {
            let flow_id = flow.flow_id.to_string();
            for mut record in self.list_executions(&flow_id, MAX_EXECUTIONS_PER_FLOW).await? {
                if record.status == ExecutionStatus::Running {
                    record.status = ExecutionStatus::Failed;
                    record.error = Some("abandoned: platform restarted".to_string());
                    record.completed_at = Some(self.clock.now());
                    self.persist_execution(&flow_id, &record).await?;
                    swept += 1;
                }
            }
        }
        Ok(swept)
    }
}

#[cfg(test)]
#[path = "flow_store_tests.rs"]
mod tests;
