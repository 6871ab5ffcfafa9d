// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake RPC client for deterministic testing.

use crate::{AgentRpcClient, AgentTarget, RpcError, RpcMessage};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Recorded call to [`FakeAgentRpcClient`].
#[derive(Debug, Clone)]
pub enum RpcCall {
    Probe { base_url: String },
    ProbeRegistration { base_url: String },
    Invoke { agent_name: String, input: Vec<RpcMessage> },
}

#[derive(Default)]
struct FakeState {
    reachable: HashMap<String, bool>,
    invoke_responses: HashMap<String, Vec<RpcMessage>>,
    invoke_failures: HashMap<String, u16>,
    calls: Vec<RpcCall>,
}

/// Scriptable [`AgentRpcClient`] for tests, mirroring the adapter-fake
/// convention used elsewhere in this workspace.
#[derive(Clone, Default)]
pub struct FakeAgentRpcClient {
    inner: Arc<Mutex<FakeState>>,
}

impl FakeAgentRpcClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts `probe`/`probe_registration` for a given base URL.
    pub fn set_reachable(&self, base_url: impl Into<String>, reachable: bool) {
        self.inner.lock().reachable.insert(base_url.into(), reachable);
    }

    /// Scripts a successful `invoke` response for an agent name.
    pub fn set_invoke_response(&self, agent_name: impl Into<String>, output: Vec<RpcMessage>) {
        let mut state = self.inner.lock();
        let agent_name = agent_name.into();
        state.invoke_failures.remove(&agent_name);
        state.invoke_responses.insert(agent_name, output);
    }

    /// Scripts `invoke` to fail for an agent name with the given HTTP status.
    pub fn set_invoke_failure(&self, agent_name: impl Into<String>, status: u16) {
        let mut state = self.inner.lock();
        let agent_name = agent_name.into();
        state.invoke_responses.remove(&agent_name);
        state.invoke_failures.insert(agent_name, status);
    }

    pub fn calls(&self) -> Vec<RpcCall> {
        self.inner.lock().calls.clone()
    }
}

#[async_trait]
impl AgentRpcClient for FakeAgentRpcClient {
    async fn probe(&self, target: &AgentTarget) -> bool {
        let mut state = self.inner.lock();
        state.calls.push(RpcCall::Probe { base_url: target.base_url.clone() });
        *state.reachable.get(&target.base_url).unwrap_or(&false)
    }

    async fn probe_registration(&self, target: &AgentTarget) -> bool {
        let mut state = self.inner.lock();
        state.calls.push(RpcCall::ProbeRegistration { base_url: target.base_url.clone() });
        *state.reachable.get(&target.base_url).unwrap_or(&false)
    }

    async fn invoke(
        &self,
        _target: &AgentTarget,
        agent_name: &str,
        input: Vec<RpcMessage>,
    ) -> Result<Vec<RpcMessage>, RpcError> {
        let mut state = self.inner.lock();
        state.calls.push(RpcCall::Invoke { agent_name: agent_name.to_string(), input: input.clone() });

        if let Some(&status) = state.invoke_failures.get(agent_name) {
            return Err(RpcError::Status { agent_name: agent_name.to_string(), status });
        }
        Ok(state.invoke_responses.get(agent_name).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
