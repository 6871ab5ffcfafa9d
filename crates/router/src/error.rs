// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Single translation point from the core crates' typed errors to HTTP.
//!
//! Mirrors the teacher's rule that only one layer performs the typed-error-
//! to-transport translation: handlers return `ApiError`, never a status code
//! directly.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use mesh_engine::{EngineError, FlowStoreError};
use mesh_registry::RegistryError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}

impl From<RegistryError> for ApiError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::AlreadyExists(name) => ApiError::Conflict(format!("agent '{name}' already registered")),
            RegistryError::NotFound(name) => ApiError::NotFound(format!("agent '{name}' not found")),
            RegistryError::InvalidRegistration(msg) => ApiError::BadRequest(msg),
            RegistryError::Store(_) | RegistryError::Corrupt(_) => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<FlowStoreError> for ApiError {
    fn from(err: FlowStoreError) -> Self {
        match err {
            FlowStoreError::NameConflict(name) => ApiError::Conflict(format!("flow '{name}' already exists")),
            FlowStoreError::FlowNotFound(id) => ApiError::NotFound(format!("flow '{id}' not found")),
            FlowStoreError::ExecutionNotFound(id) => ApiError::NotFound(format!("execution '{id}' not found")),
            FlowStoreError::Store(_) | FlowStoreError::Corrupt(_) => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::FlowNotFound(id) => ApiError::NotFound(format!("flow '{id}' not found")),
            EngineError::FlowNotReady(_)
            | EngineError::NoStartAgents
            | EngineError::CircularOrMissingDependency(_)
            | EngineError::RequiredAgentFailed(_) => ApiError::BadRequest(err.to_string()),
            EngineError::Registry(e) => e.into(),
            EngineError::FlowStore(e) => e.into(),
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
