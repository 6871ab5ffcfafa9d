// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::keys::{agent_hash, AGENTS_SET};
use mesh_core::{AgentRecord, AgentRegistration, AgentStatus, Clock};
use mesh_store::{Store, StoreError};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("agent '{0}' is already registered")]
    AlreadyExists(String),
    #[error("agent '{0}' is not registered")]
    NotFound(String),
    #[error("registration rejected: {0}")]
    InvalidRegistration(String),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("stored agent record for '{0}' is corrupt")]
    Corrupt(String),
}

/// Agent registry: the authoritative record of every known agent and its
/// current liveness status.
pub struct Registry {
    store: Arc<dyn Store>,
    clock: Arc<dyn Clock>,
}

impl Registry {
    pub fn new(store: Arc<dyn Store>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    fn record_to_fields(record: &AgentRecord) -> Result<std::collections::HashMap<String, serde_json::Value>, RegistryError> {
        match serde_json::to_value(record) {
            Ok(serde_json::Value::Object(map)) => Ok(map.into_iter().collect()),
            _ => Err(RegistryError::Corrupt(record.agent_name.clone())),
        }
    }

    fn fields_to_record(name: &str, fields: std::collections::HashMap<String, serde_json::Value>) -> Result<AgentRecord, RegistryError> {
        let value = serde_json::Value::Object(fields.into_iter().collect());
        serde_json::from_value(value).map_err(|_| RegistryError::Corrupt(name.to_string()))
    }

    /// Atomic "insert if absent" on `agent_name`. Returns the stamped record.
    pub async fn register(&self, registration: AgentRegistration) -> Result<AgentRecord, RegistryError> {
        registration
            .validate()
            .map_err(|e| RegistryError::InvalidRegistration(e.to_string()))?;

        if self.store.exists(&agent_hash(&registration.agent_name)).await?
        {
            return Err(RegistryError::AlreadyExists(registration.agent_name));
        }

        let record = registration.into_record(self.clock.now());
        let fields = Self::record_to_fields(&record)?;
        self.store.hash_set(&agent_hash(&record.agent_name), fields).await?;
        self.store.set_add(AGENTS_SET, &record.agent_name).await?;
        Ok(record)
    }

    /// Deletes any stale record and re-inserts, bypassing the "already exists" check.
    /// Used for re-registration after a platform restart (§9).
    pub async fn force_register(&self, registration: AgentRegistration) -> Result<AgentRecord, RegistryError> {
        registration
            .validate()
            .map_err(|e| RegistryError::InvalidRegistration(e.to_string()))?;

        let record = registration.into_record(self.clock.now());
        let fields = Self::record_to_fields(&record)?;
        self.store.hash_set(&agent_hash(&record.agent_name), fields).await?;
        self.store.set_add(AGENTS_SET, &record.agent_name).await?;
        Ok(record)
    }

    pub async fn get(&self, name: &str) -> Result<Option<AgentRecord>, RegistryError> {
        match self.store.hash_get(&agent_hash(name)).await? {
            Some(fields) if !fields.is_empty() => Ok(Some(Self::fields_to_record(name, fields)?)),
            _ => Ok(None),
        }
    }

    pub async fn list(&self) -> Result<Vec<AgentRecord>, RegistryError> {
        let names = self.store.set_members(AGENTS_SET).await?;
        let mut records = Vec::with_capacity(names.len());
        for name in names {
            if let Some(record) = self.get(&name).await? {
                records.push(record);
            }
        }
        Ok(records)
    }

    pub async fn delete(&self, name: &str) -> Result<bool, RegistryError> {
        let deleted = self.store.hash_delete(&agent_hash(name)).await?;
        self.store.set_remove(AGENTS_SET, name).await?;
        Ok(deleted)
    }

    pub async fn cleanup_all(&self) -> Result<usize, RegistryError> {
        let names = self.store.set_members(AGENTS_SET).await?;
        for name in &names {
            self.store.hash_delete(&agent_hash(name)).await?;
            self.store.set_remove(AGENTS_SET, name).await?;
        }
        Ok(names.len())
    }

    pub async fn update_status(&self, name: &str, status: AgentStatus) -> Result<(), RegistryError> {
        if !self.store.exists(&agent_hash(name)).await? {
            return Err(RegistryError::NotFound(name.to_string()));
        }
        let now = self.clock.now();
        self.store
            .hash_set_field(&agent_hash(name), "status", serde_json::to_value(status).unwrap_or_default())
            .await?;
        self.store
            .hash_set_field(&agent_hash(name), "last_verified", serde_json::to_value(now).unwrap_or_default())
            .await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
