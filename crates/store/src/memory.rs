// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory [`Store`] implementation backed by `parking_lot`-guarded maps.

use crate::{Store, StoreResult};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::HashMap;

#[derive(Default)]
struct State {
    hashes: HashMap<String, HashMap<String, Value>>,
    sets: HashMap<String, Vec<String>>,
    lists: HashMap<String, Vec<Value>>,
}

/// Volatile [`Store`] backend. Everything lives in process memory and is
/// lost on restart; the daemon's startup sweep exists precisely because of
/// this.
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for InMemoryStore {
    async fn exists(&self, key: &str) -> StoreResult<bool> {
        Ok(self.state.lock().hashes.contains_key(key))
    }

    async fn hash_get(&self, key: &str) -> StoreResult<Option<HashMap<String, Value>>> {
        Ok(self.state.lock().hashes.get(key).cloned())
    }

    async fn hash_get_field(&self, key: &str, field: &str) -> StoreResult<Option<Value>> {
        Ok(self
            .state
            .lock()
            .hashes
            .get(key)
            .and_then(|fields| fields.get(field).cloned()))
    }

    async fn hash_set(&self, key: &str, fields: HashMap<String, Value>) -> StoreResult<()> {
        self.state.lock().hashes.entry(key.to_string()).or_default().extend(fields);
        Ok(())
    }

    async fn hash_set_field(&self, key: &str, field: &str, value: Value) -> StoreResult<()> {
        self.state
            .lock()
            .hashes
            .entry(key.to_string())
            .or_default()
            .insert(field.to_string(), value);
        Ok(())
    }

    async fn hash_delete(&self, key: &str) -> StoreResult<bool> {
        Ok(self.state.lock().hashes.remove(key).is_some())
    }

    async fn set_add(&self, key: &str, member: &str) -> StoreResult<bool> {
        let mut state = self.state.lock();
        let members = state.sets.entry(key.to_string()).or_default();
        if members.iter().any(|m| m == member) {
            Ok(false)
        } else {
            members.push(member.to_string());
            Ok(true)
        }
    }

    async fn set_remove(&self, key: &str, member: &str) -> StoreResult<bool> {
        let mut state = self.state.lock();
        let Some(members) = state.sets.get_mut(key) else {
            return Ok(false);
        };
        let before = members.len();
        members.retain(|m| m != member);
        Ok(members.len() != before)
    }

    async fn set_members(&self, key: &str) -> StoreResult<Vec<String>> {
        Ok(self.state.lock().sets.get(key).cloned().unwrap_or_default())
    }

    async fn list_push_left(&self, key: &str, value: Value) -> StoreResult<()> {
        self.state.lock().lists.entry(key.to_string()).or_default().insert(0, value);
        Ok(())
    }

    async fn list_trim(&self, key: &str, len: usize) -> StoreResult<()> {
        if let Some(list) = self.state.lock().lists.get_mut(key) {
            list.truncate(len);
        }
        Ok(())
    }

    async fn list_range(&self, key: &str, start: usize, end: Option<usize>) -> StoreResult<Vec<Value>> {
        let state = self.state.lock();
        let Some(list) = state.lists.get(key) else {
            return Ok(Vec::new());
        };
        if start >= list.len() {
            return Ok(Vec::new());
        }
        let end = end.map(|e| e.min(list.len().saturating_sub(1))).unwrap_or(list.len().saturating_sub(1));
        if end < start {
            return Ok(Vec::new());
        }
        Ok(list[start..=end].to_vec())
    }

    async fn list_remove_value(&self, key: &str, value: &Value) -> StoreResult<usize> {
        let mut state = self.state.lock();
        let Some(list) = state.lists.get_mut(key) else {
            return Ok(0);
        };
        let before = list.len();
        list.retain(|v| v != value);
        Ok(before - list.len())
    }

    async fn list_replace(&self, key: &str, values: Vec<Value>) -> StoreResult<()> {
        self.state.lock().lists.insert(key.to_string(), values);
        Ok(())
    }

    async fn list_delete(&self, key: &str) -> StoreResult<()> {
        self.state.lock().lists.remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
