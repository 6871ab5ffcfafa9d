// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Abstract persistent storage interface.
//!
//! The registry, flow store, and execution records never talk to a concrete
//! database — they talk to a [`Store`]: a keyed hash map, a set, and an
//! ordered list, each assumed atomic at single-key granularity. This crate
//! ships exactly one backend, [`InMemoryStore`], which is all the test suite
//! exercises. A durable backend (Redis, sled, ...) is a drop-in implementation
//! of the same trait and is out of scope here.

mod memory;

pub use memory::InMemoryStore;

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Errors a [`Store`] implementation can surface. The in-memory backend never
/// actually produces one; a networked backend would use it for transport and
/// serialization failures.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Abstract persistent map/set/list operations.
///
/// All operations are atomic at single-key granularity; the core never relies
/// on multi-key transactions, so a [`Store`] implementation need not provide
/// any cross-key isolation.
#[async_trait]
pub trait Store: Send + Sync {
    /// Returns whether a hash key currently has any fields stored.
    async fn exists(&self, key: &str) -> StoreResult<bool>;

    /// Reads the entire hash stored at `key`.
    async fn hash_get(&self, key: &str) -> StoreResult<Option<HashMap<String, Value>>>;

    /// Reads a single field of the hash stored at `key`.
    async fn hash_get_field(&self, key: &str, field: &str) -> StoreResult<Option<Value>>;

    /// Overwrites (or creates) the hash at `key`, merging the given fields in.
    async fn hash_set(&self, key: &str, fields: HashMap<String, Value>) -> StoreResult<()>;

    /// Sets a single field on the hash at `key`, creating the hash if absent.
    async fn hash_set_field(&self, key: &str, field: &str, value: Value) -> StoreResult<()>;

    /// Deletes the hash at `key`. Returns `true` if it existed.
    async fn hash_delete(&self, key: &str) -> StoreResult<bool>;

    /// Adds `member` to the set at `key`. Returns `true` if it was not already present.
    async fn set_add(&self, key: &str, member: &str) -> StoreResult<bool>;

    /// Removes `member` from the set at `key`. Returns `true` if it was present.
    async fn set_remove(&self, key: &str, member: &str) -> StoreResult<bool>;

    /// Lists every member of the set at `key`.
    async fn set_members(&self, key: &str) -> StoreResult<Vec<String>>;

    /// Prepends `value` to the list at `key`.
    async fn list_push_left(&self, key: &str, value: Value) -> StoreResult<()>;

    /// Trims the list at `key` to its first `len` elements (most-recently pushed first).
    async fn list_trim(&self, key: &str, len: usize) -> StoreResult<()>;

    /// Returns the elements of the list at `key` in `[start, end]` (inclusive),
    /// where `end = None` means "to the end of the list".
    async fn list_range(&self, key: &str, start: usize, end: Option<usize>) -> StoreResult<Vec<Value>>;

    /// Removes every element exactly equal to `value` from the list at `key`.
    /// Returns the number of elements removed.
    async fn list_remove_value(&self, key: &str, value: &Value) -> StoreResult<usize>;

    /// Replaces the entire contents of the list at `key`.
    async fn list_replace(&self, key: &str, values: Vec<Value>) -> StoreResult<()>;

    /// Deletes the list at `key` entirely.
    async fn list_delete(&self, key: &str) -> StoreResult<()>;
}
