// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::registry::Registry;
use mesh_core::AgentStatus;
use mesh_rpc::{AgentRpcClient, AgentTarget};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::warn;

/// Tunables for the per-agent liveness loop.
#[derive(Debug, Clone, Copy)]
pub struct SupervisorConfig {
    pub ping_interval: Duration,
    pub max_failures: u32,
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self {
            ping_interval: Duration::from_secs(3),
            max_failures: 3,
        }
    }
}

/// One long-lived background task per registered agent, owned exclusively by
/// the supervisor. No other component may touch the task table.
pub struct LivenessSupervisor {
    registry: Arc<Registry>,
    rpc: Arc<dyn AgentRpcClient>,
    config: SupervisorConfig,
    probers: Arc<Mutex<HashMap<String, JoinHandle<()>>>>,
}

impl LivenessSupervisor {
    pub fn new(registry: Arc<Registry>, rpc: Arc<dyn AgentRpcClient>, config: SupervisorConfig) -> Self {
        Self {
            registry,
            rpc,
            config,
            probers: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Spawns a prober for `agent_name`. Idempotent: cancels any existing
    /// prober for the same name before spawning the new one.
    pub fn spawn(&self, agent_name: &str, target: AgentTarget) {
        self.cancel(agent_name);

        let registry = self.registry.clone();
        let rpc = self.rpc.clone();
        let config = self.config;
        let name = agent_name.to_string();
        let probers = self.probers.clone();
        let self_name = name.clone();

        let handle = tokio::spawn(async move {
            let mut failures = 0u32;
            loop {
                tokio::time::sleep(config.ping_interval).await;

                if rpc.probe(&target).await {
                    failures = 0;
                    if registry.update_status(&name, AgentStatus::Active).await.is_err() {
                        probers.lock().remove(&name);
                        return;
                    }
                } else {
                    failures += 1;
                    warn!(agent = %name, probe = true, failures, "liveness probe failed");
                    if failures >= config.max_failures {
                        let _ = registry.delete(&name).await;
                        probers.lock().remove(&name);
                        return;
                    }
                }
            }
        });

        self.probers.lock().insert(self_name, handle);
    }

    /// Cancels the prober for `agent_name`, if one exists.
    pub fn cancel(&self, agent_name: &str) {
        if let Some(handle) = self.probers.lock().remove(agent_name) {
            handle.abort();
        }
    }

    /// Cancels every prober. Used on graceful shutdown.
    pub fn cancel_all(&self) {
        let mut probers = self.probers.lock();
        for (_, handle) in probers.drain() {
            handle.abort();
        }
    }

    pub fn has_prober(&self, agent_name: &str) -> bool {
        self.probers.lock().contains_key(agent_name)
    }

    pub fn prober_count(&self) -> usize {
        self.probers.lock().len()
    }

    /// Enumerates every registered agent and performs a one-shot verification
    /// probe. Reachable agents get a prober; unreachable agents are marked
    /// `inactive` but never deleted here — only the steady-state eviction
    /// loop deletes.
    pub async fn restore(&self) -> Result<(), crate::registry::RegistryError> {
        for record in self.registry.list().await? {
            let target = AgentTarget {
                base_url: record.base_url.clone(),
                auth_token: record.auth_token.clone(),
            };
            if self.rpc.probe(&target).await {
                self.registry.update_status(&record.agent_name, AgentStatus::Active).await?;
                self.spawn(&record.agent_name, target);
            } else {
                self.registry.update_status(&record.agent_name, AgentStatus::Inactive).await?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "supervisor_tests.rs"]
mod tests;
