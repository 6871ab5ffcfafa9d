// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `meshctl flow` - flow definition and execution commands

use crate::client::MeshClient;
use anyhow::Result;
use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Args)]
pub struct FlowArgs {
    #[command(subcommand)]
    pub command: FlowCommand,
}

#[derive(Subcommand)]
pub enum FlowCommand {
    /// Create an empty flow
    Create { name: String },
    /// List known flows
    List,
    /// Show a single flow's definition
    Get { id: String },
    /// Delete a flow
    Delete { id: String },
    /// Add an agent step to a flow
    AddAgent {
        id: String,
        #[arg(long)]
        agent_name: String,
        /// Comma-separated list of agent names this step depends on
        #[arg(long, value_delimiter = ',')]
        upstream_agents: Vec<String>,
    },
    /// Remove an agent step from a flow
    RemoveAgent { id: String, agent_name: String },
    /// Execute a flow
    Execute {
        id: String,
        /// JSON-encoded input payload, defaults to `{}`
        #[arg(long)]
        input: Option<String>,
    },
    /// List executions recorded for a flow
    Executions { id: String },
    /// Show a single execution's result
    Execution { id: String, exec_id: String },
    /// Export a flow definition as JSON
    Export { id: String },
    /// Import a flow definition from a JSON file
    Import {
        path: PathBuf,
        #[arg(long)]
        overwrite: bool,
    },
}

pub async fn run(client: &MeshClient, args: FlowArgs) -> Result<()> {
    let body = match args.command {
        FlowCommand::Create { name } => {
            client.post("/flows", &serde_json::json!({ "name": name })).await?
        }
        FlowCommand::List => client.get("/flows").await?,
        FlowCommand::Get { id } => client.get(&format!("/flows/{id}")).await?,
        FlowCommand::Delete { id } => client.delete(&format!("/flows/{id}")).await?,
        FlowCommand::AddAgent { id, agent_name, upstream_agents } => {
            client
                .post(
                    &format!("/flows/{id}/agents"),
                    &serde_json::json!({ "agent_name": agent_name, "upstream_agents": upstream_agents }),
                )
                .await?
        }
        FlowCommand::RemoveAgent { id, agent_name } => {
            client.delete(&format!("/flows/{id}/agents/{agent_name}")).await?
        }
        FlowCommand::Execute { id, input } => {
            let input: serde_json::Value = match input {
                Some(raw) => serde_json::from_str(&raw)?,
                None => serde_json::json!({}),
            };
            client.post(&format!("/flows/{id}/execute"), &serde_json::json!({ "input": input })).await?
        }
        FlowCommand::Executions { id } => client.get(&format!("/flows/{id}/executions")).await?,
        FlowCommand::Execution { id, exec_id } => {
            client.get(&format!("/flows/{id}/executions/{exec_id}")).await?
        }
        FlowCommand::Export { id } => client.get(&format!("/flows/{id}/export")).await?,
        FlowCommand::Import { path, overwrite } => {
            let raw = std::fs::read_to_string(&path)?;
            let mut definition: serde_json::Value = serde_json::from_str(&raw)?;
            if let Some(obj) = definition.as_object_mut() {
                obj.insert("overwrite_existing".to_string(), serde_json::json!(overwrite));
            }
            client.post("/flows/import", &definition).await?
        }
    };
    println!("{}", serde_json::to_string_pretty(&body)?);
    Ok(())
}
