// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! meshd - agent mesh platform daemon.
//!
//! Owns the registry, liveness supervisor, flow store, and execution engine,
//! and exposes them over HTTP via `mesh-router`.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod config;

use config::Config;
use mesh_core::UuidIdGen;
use mesh_engine::{EngineConfig, FlowExecutionEngine, FlowStore};
use mesh_registry::{LivenessSupervisor, Registry, SupervisorConfig};
use mesh_rpc::{AgentRpcClient, HttpAgentRpcClient};
use mesh_router::{build_router, AppState};
use mesh_store::InMemoryStore;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("starting meshd");

    let store = Arc::new(InMemoryStore::new());
    let clock: Arc<dyn mesh_core::Clock> = Arc::new(mesh_core::SystemClock);
    let ids = Arc::new(UuidIdGen);
    let rpc: Arc<dyn AgentRpcClient> = Arc::new(
        HttpAgentRpcClient::new()
            .with_invoke_timeout(config.invoke_timeout)
            .with_probe_timeout(config.probe_timeout),
    );

    let registry = Arc::new(Registry::new(store.clone(), clock.clone()));
    let supervisor = Arc::new(LivenessSupervisor::new(
        registry.clone(),
        rpc.clone(),
        SupervisorConfig { ping_interval: config.ping_interval, max_failures: config.max_failures },
    ));
    let flow_store = Arc::new(FlowStore::new(store, clock, ids));
    let engine = Arc::new(FlowExecutionEngine::new(
        flow_store.clone(),
        registry.clone(),
        rpc.clone(),
        Arc::new(mesh_core::SystemClock),
        EngineConfig { retry_count: config.retry_count, retry_delay: config.retry_delay },
    ));

    // Startup reconciliation: mark every previously registered agent active or
    // inactive and spawn probers for the reachable ones, then drop any
    // execution left `running` by a prior crash.
    supervisor.restore().await?;
    let swept = flow_store.sweep_orphaned_executions().await?;
    if swept > 0 {
        info!(swept, "marked orphaned executions failed on startup");
    }

    let state = AppState { registry, supervisor: supervisor.clone(), flow_store, engine, rpc };
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    info!(addr = %config.bind_addr(), "meshd ready");

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()?).await?;

    supervisor.cancel_all();
    info!("meshd stopped");
    Ok(())
}

fn shutdown_signal() -> std::io::Result<impl std::future::Future<Output = ()>> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    Ok(async move {
        tokio::select! {
            _ = sigterm.recv() => info!("received SIGTERM, shutting down"),
            _ = sigint.recv() => info!("received SIGINT, shutting down"),
        }
    })
}
