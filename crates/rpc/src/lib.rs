// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Outbound client for the external agent protocol: liveness probing and
//! single-agent invocation.

#[cfg(feature = "test-support")]
pub mod fake;
mod http;

pub use http::HttpAgentRpcClient;

#[cfg(feature = "test-support")]
pub use fake::{FakeAgentRpcClient, RpcCall};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Where to reach an agent, and how to authenticate to it.
#[derive(Debug, Clone)]
pub struct AgentTarget {
    pub base_url: String,
    pub auth_token: String,
}

/// A single message exchanged with an agent: one opaque text content field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcMessage {
    pub content: String,
}

impl RpcMessage {
    pub fn new(content: impl Into<String>) -> Self {
        Self { content: content.into() }
    }
}

#[derive(Debug, Error)]
pub enum RpcError {
    #[error("transport error calling agent '{agent_name}': {source}")]
    Transport {
        agent_name: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("agent '{agent_name}' responded with status {status}")]
    Status { agent_name: String, status: u16 },
    #[error("agent '{agent_name}' returned a malformed response")]
    Malformed { agent_name: String },
}

/// Short timeout for liveness probes.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(2);
/// Default timeout for a synchronous invocation.
pub const DEFAULT_INVOKE_TIMEOUT: Duration = Duration::from_secs(30);

#[async_trait]
pub trait AgentRpcClient: Send + Sync {
    /// Liveness probe used by the supervisor. True iff a GET to the agent's
    /// well-known liveness path returns a 2xx within [`PROBE_TIMEOUT`].
    async fn probe(&self, target: &AgentTarget) -> bool;

    /// Registration-time liveness probe. A 404 is tolerated as "reachable"
    /// here, unlike the steady-state [`probe`](Self::probe).
    async fn probe_registration(&self, target: &AgentTarget) -> bool;

    /// Synchronous request/response invocation of a named agent.
    async fn invoke(
        &self,
        target: &AgentTarget,
        agent_name: &str,
        input: Vec<RpcMessage>,
    ) -> Result<Vec<RpcMessage>, RpcError>;
}
