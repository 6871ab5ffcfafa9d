// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the daemon binary.

use std::time::Duration;

fn var_parsed<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|s| s.parse().ok())
}

/// Daemon-wide configuration, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_host: String,
    pub bind_port: u16,
    pub ping_interval: Duration,
    pub max_failures: u32,
    pub retry_count: u32,
    pub retry_delay: Duration,
    pub probe_timeout: Duration,
    pub invoke_timeout: Duration,
    /// Unused today: the store is in-memory, but config is resolved through
    /// one module even for fields no current backend reads.
    #[allow(dead_code)]
    pub store_addr: Option<String>,
}

impl Config {
    /// Loads configuration from the environment, falling back to defaults.
    pub fn load() -> Self {
        Self {
            bind_host: std::env::var("MESH_BIND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            bind_port: var_parsed("MESH_BIND_PORT").unwrap_or(8080),
            ping_interval: var_parsed::<u64>("MESH_PING_INTERVAL_MS").map(Duration::from_millis).unwrap_or(Duration::from_secs(3)),
            max_failures: var_parsed("MESH_MAX_FAILURES").unwrap_or(3),
            retry_count: var_parsed("MESH_RETRY_COUNT").unwrap_or(3),
            retry_delay: var_parsed::<u64>("MESH_RETRY_DELAY_MS").map(Duration::from_millis).unwrap_or(Duration::from_secs(1)),
            probe_timeout: var_parsed::<u64>("MESH_PROBE_TIMEOUT_MS").map(Duration::from_millis).unwrap_or(Duration::from_secs(2)),
            invoke_timeout: var_parsed::<u64>("MESH_INVOKE_TIMEOUT_MS").map(Duration::from_millis).unwrap_or(Duration::from_secs(30)),
            store_addr: std::env::var("MESH_STORE_ADDR").ok(),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_host, self.bind_port)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
