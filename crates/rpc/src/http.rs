// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::{AgentRpcClient, AgentTarget, RpcError, RpcMessage, DEFAULT_INVOKE_TIMEOUT, PROBE_TIMEOUT};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// `reqwest`-backed implementation of [`AgentRpcClient`].
pub struct HttpAgentRpcClient {
    client: Client,
    invoke_timeout: std::time::Duration,
    probe_timeout: std::time::Duration,
}

impl HttpAgentRpcClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            invoke_timeout: DEFAULT_INVOKE_TIMEOUT,
            probe_timeout: PROBE_TIMEOUT,
        }
    }

    pub fn with_invoke_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.invoke_timeout = timeout;
        self
    }

    pub fn with_probe_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    fn authed(&self, builder: reqwest::RequestBuilder, target: &AgentTarget) -> reqwest::RequestBuilder {
        if target.auth_token.is_empty() {
            builder
        } else {
            builder.bearer_auth(&target.auth_token)
        }
    }
}

impl Default for HttpAgentRpcClient {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct InvokeRequest<'a> {
    agent_name: &'a str,
    input: &'a [RpcMessage],
}

#[derive(Deserialize)]
struct InvokeResponse {
    #[serde(default)]
    output: Vec<RpcMessage>,
}

#[async_trait]
impl AgentRpcClient for HttpAgentRpcClient {
    async fn probe(&self, target: &AgentTarget) -> bool {
        let request = self
            .authed(self.client.get(format!("{}/", target.base_url.trim_end_matches('/'))), target)
            .timeout(self.probe_timeout);
        matches!(request.send().await, Ok(response) if response.status().is_success())
    }

    async fn probe_registration(&self, target: &AgentTarget) -> bool {
        let request = self
            .authed(self.client.get(format!("{}/agents", target.base_url.trim_end_matches('/'))), target)
            .timeout(self.probe_timeout);
        match request.send().await {
            Ok(response) => response.status().is_success() || response.status().as_u16() == 404,
            Err(_) => false,
        }
    }

    async fn invoke(
        &self,
        target: &AgentTarget,
        agent_name: &str,
        input: Vec<RpcMessage>,
    ) -> Result<Vec<RpcMessage>, RpcError> {
        let body = InvokeRequest { agent_name, input: &input };
        let request = self
            .authed(
                self.client.post(format!("{}/runs", target.base_url.trim_end_matches('/'))),
                target,
            )
            .timeout(self.invoke_timeout)
            .json(&body);

        let response = request.send().await.map_err(|source| RpcError::Transport {
            agent_name: agent_name.to_string(),
            source,
        })?;

        if !response.status().is_success() {
            return Err(RpcError::Status {
                agent_name: agent_name.to_string(),
                status: response.status().as_u16(),
            });
        }

        response
            .json::<InvokeResponse>()
            .await
            .map(|parsed| parsed.output)
            .map_err(|_| RpcError::Malformed {
                agent_name: agent_name.to_string(),
            })
    }
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;
