// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP client for talking to `meshd`.

use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

fn daemon_url() -> String {
    std::env::var("MESH_DAEMON_URL").unwrap_or_else(|_| "http://127.0.0.1:8080".to_string())
}

fn timeout_ms() -> Duration {
    std::env::var("MESH_CLI_TIMEOUT_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(Duration::from_secs(10))
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("could not reach meshd at {url}: {source}")]
    Connect { url: String, source: reqwest::Error },
    #[error("meshd returned {status}: {body}")]
    Status { status: u16, body: Value },
}

/// Thin wrapper over `reqwest` pointed at the daemon's HTTP API.
pub struct MeshClient {
    http: reqwest::Client,
    base_url: String,
}

impl MeshClient {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::builder().timeout(timeout_ms()).build().unwrap_or_default(),
            base_url: daemon_url(),
        }
    }

    async fn send(&self, response: Result<reqwest::Response, reqwest::Error>) -> Result<Value, ClientError> {
        let response = response.map_err(|source| ClientError::Connect { url: self.base_url.clone(), source })?;
        let status = response.status();
        let body: Value = response.json().await.unwrap_or(Value::Null);
        if status.is_success() {
            Ok(body)
        } else {
            Err(ClientError::Status { status: status.as_u16(), body })
        }
    }

    pub async fn get(&self, path: &str) -> Result<Value, ClientError> {
        let response = self.http.get(format!("{}{path}", self.base_url)).send().await;
        self.send(response).await
    }

    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value, ClientError> {
        let response = self.http.post(format!("{}{path}", self.base_url)).json(body).send().await;
        self.send(response).await
    }

    pub async fn delete(&self, path: &str) -> Result<Value, ClientError> {
        let response = self.http.delete(format!("{}{path}", self.base_url)).send().await;
        self.send(response).await
    }
}

impl Default for MeshClient {
    fn default() -> Self {
        Self::new()
    }
}
