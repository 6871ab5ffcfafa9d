// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Flow definitions: a named DAG of agents with per-node `required` flags.

use crate::id::FlowId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One node in a flow's dependency graph.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FlowAgentEntry {
    pub agent_name: String,
    #[serde(default)]
    pub upstream_agents: Vec<String>,
    #[serde(default = "default_required")]
    pub required: bool,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub added_at: String,
}

fn default_required() -> bool {
    true
}

/// A named DAG of agents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowDefinition {
    pub flow_id: FlowId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imported_from: Option<String>,
    pub agents: Vec<FlowAgentEntry>,
}

impl FlowDefinition {
    /// Returns the node named `name`, if present.
    pub fn agent(&self, name: &str) -> Option<&FlowAgentEntry> {
        self.agents.iter().find(|a| a.agent_name == name)
    }

    /// Nodes with no upstream dependencies — the engine's wave-1 start set.
    pub fn start_agents(&self) -> Vec<&FlowAgentEntry> {
        self.agents
            .iter()
            .filter(|a| a.upstream_agents.is_empty())
            .collect()
    }

    /// Nodes no other node lists as an upstream dependency.
    pub fn terminal_agents(&self) -> Vec<&str> {
        self.agents
            .iter()
            .filter(|candidate| {
                !self
                    .agents
                    .iter()
                    .any(|other| other.upstream_agents.iter().any(|u| u == &candidate.agent_name))
            })
            .map(|a| a.agent_name.as_str())
            .collect()
    }
}

/// Portable, storage-independent projection of a flow used by export/import.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FlowExportAgent {
    pub agent_name: String,
    pub upstream_agents: Vec<String>,
    pub required: bool,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowExportMetadata {
    pub exported_at: DateTime<Utc>,
    pub platform_version: String,
    pub agent_count: usize,
    pub original_flow_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowExport {
    pub name: String,
    pub description: String,
    pub agents: Vec<FlowExportAgent>,
    pub metadata: FlowExportMetadata,
}

/// Payload accepted by the import endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct FlowImport {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub agents: Vec<FlowExportAgent>,
}

#[cfg(test)]
#[path = "flow_tests.rs"]
mod tests;
