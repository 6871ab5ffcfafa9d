// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Stateless HTTP adapter mapping external operations onto the registry,
//! flow store, and execution engine.

mod agents;
pub mod dto;
pub mod error;
mod flows;
mod runs;
pub mod state;

use axum::routing::{delete, get, post};
use axum::Json;
use axum::Router;
use dto::HealthResponse;
pub use error::ApiError;
pub use state::AppState;

async fn healthz() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Builds the full router, ready to be served with `axum::serve`.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/platform/agents/register", post(agents::register))
        .route("/platform/agents/cleanup", delete(agents::cleanup))
        .route("/platform/agents/{name}", delete(agents::delete))
        .route("/agents", get(agents::list))
        .route("/agents/{name}", get(agents::get))
        .route("/runs", post(runs::create))
        .route("/flows", post(flows::create).get(flows::list))
        .route("/flows/import", post(flows::import))
        .route("/flows/{id}", get(flows::get).delete(flows::delete))
        .route("/flows/{id}/agents", post(flows::add_agent))
        .route("/flows/{id}/agents/{agent_name}", delete(flows::remove_agent))
        .route("/flows/{id}/execute", post(flows::execute))
        .route("/flows/{id}/executions", get(flows::list_executions))
        .route("/flows/{id}/executions/{exec_id}", get(flows::get_execution))
        .route("/flows/{id}/export", get(flows::export))
        .with_state(state)
}
