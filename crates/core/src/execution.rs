// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Execution records: a single attempt to run a flow.

use crate::id::{ExecutionId, FlowId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Lifecycle state of a flow execution. Monotonic: `Pending -> Running -> (Completed | Failed)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

/// Outcome of a single agent within an execution's retry loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentResultStatus {
    Completed,
    Failed,
}

/// Per-agent trace entry, written on every attempt (success or final failure).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentResult {
    pub status: AgentResultStatus,
    pub output: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub attempts: u32,
}

/// A single attempt to run a flow with a given input payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionRecord {
    pub execution_id: ExecutionId,
    pub flow_id: FlowId,
    pub status: ExecutionStatus,
    pub input_data: serde_json::Value,
    pub output_data: serde_json::Value,
    pub started_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default)]
    pub agent_results: HashMap<String, AgentResult>,
}

impl ExecutionRecord {
    pub fn new(
        execution_id: ExecutionId,
        flow_id: FlowId,
        input_data: serde_json::Value,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            execution_id,
            flow_id,
            status: ExecutionStatus::Pending,
            input_data,
            output_data: serde_json::json!({}),
            started_at: now,
            completed_at: None,
            error: None,
            agent_results: HashMap::new(),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.status, ExecutionStatus::Completed | ExecutionStatus::Failed)
    }
}

#[cfg(test)]
#[path = "execution_tests.rs"]
mod tests;
