// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Agent record: the registry's primary data type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Liveness state of a registered agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    Active,
    Inactive,
}

impl fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentStatus::Active => write!(f, "active"),
            AgentStatus::Inactive => write!(f, "inactive"),
        }
    }
}

fn default_content_types() -> Vec<String> {
    vec!["*/*".to_string()]
}

/// A registered agent: one externally hosted worker reachable over HTTP.
///
/// `agent_name` is the primary key — unique, non-empty, and stable across the
/// agent's lifetime. `capabilities` must never be empty (enforced by
/// [`AgentRegistration::validate`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentRecord {
    pub agent_name: String,
    pub agent_type: String,
    #[serde(default = "default_version")]
    pub version: String,

    pub base_url: String,
    pub auth_token: String,
    #[serde(default)]
    pub port: Option<u16>,

    pub capabilities: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
    #[serde(default = "default_content_types")]
    pub input_content_types: Vec<String>,
    #[serde(default = "default_content_types")]
    pub output_content_types: Vec<String>,

    pub status: AgentStatus,
    pub registered_at: DateTime<Utc>,
    pub last_verified: DateTime<Utc>,
}

fn default_version() -> String {
    "1.0.0".to_string()
}

/// The caller-supplied fields for a new registration. Everything else in
/// [`AgentRecord`] (`status`, `registered_at`, `last_verified`) is stamped by
/// the registry itself, never accepted from the caller.
#[derive(Debug, Clone, Deserialize)]
pub struct AgentRegistration {
    pub agent_name: String,
    pub agent_type: String,
    #[serde(default = "default_version")]
    pub version: String,
    pub base_url: String,
    pub auth_token: String,
    #[serde(default)]
    pub port: Option<u16>,
    pub capabilities: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
    #[serde(default = "default_content_types")]
    pub input_content_types: Vec<String>,
    #[serde(default = "default_content_types")]
    pub output_content_types: Vec<String>,
}

/// Field-level validation failure for a registration payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationFieldError {
    MissingOrEmpty(&'static str),
    EmptyCapabilities,
}

impl fmt::Display for RegistrationFieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistrationFieldError::MissingOrEmpty(field) => {
                write!(f, "missing or empty required field: {field}")
            }
            RegistrationFieldError::EmptyCapabilities => {
                write!(f, "capabilities must be a non-empty list")
            }
        }
    }
}

impl AgentRegistration {
    /// Validates the fixed set of required fields (§9: unknown fields on
    /// input are rejected/ignored, never silently propagated as a bag).
    pub fn validate(&self) -> Result<(), RegistrationFieldError> {
        if self.agent_name.trim().is_empty() {
            return Err(RegistrationFieldError::MissingOrEmpty("agent_name"));
        }
        if self.agent_type.trim().is_empty() {
            return Err(RegistrationFieldError::MissingOrEmpty("agent_type"));
        }
        if self.base_url.trim().is_empty() {
            return Err(RegistrationFieldError::MissingOrEmpty("base_url"));
        }
        if self.auth_token.trim().is_empty() {
            return Err(RegistrationFieldError::MissingOrEmpty("auth_token"));
        }
        if self.capabilities.is_empty() {
            return Err(RegistrationFieldError::EmptyCapabilities);
        }
        Ok(())
    }

    pub fn into_record(self, now: DateTime<Utc>) -> AgentRecord {
        AgentRecord {
            agent_name: self.agent_name,
            agent_type: self.agent_type,
            version: self.version,
            base_url: self.base_url,
            auth_token: self.auth_token,
            port: self.port,
            capabilities: self.capabilities,
            tags: self.tags,
            description: self.description,
            contact: self.contact,
            metadata: self.metadata,
            input_content_types: self.input_content_types,
            output_content_types: self.output_content_types,
            status: AgentStatus::Active,
            registered_at: now,
            last_verified: now,
        }
    }
}

#[cfg(test)]
#[path = "agent_tests.rs"]
mod tests;
