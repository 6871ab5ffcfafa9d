// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `meshctl agent` - agent registry commands

use crate::client::MeshClient;
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Args)]
pub struct AgentArgs {
    #[command(subcommand)]
    pub command: AgentCommand,
}

#[derive(Subcommand)]
pub enum AgentCommand {
    /// Register an agent with the mesh
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        agent_type: String,
        #[arg(long)]
        base_url: String,
        #[arg(long)]
        auth_token: String,
        /// Comma-separated capability list
        #[arg(long, value_delimiter = ',')]
        capabilities: Vec<String>,
    },
    /// Remove an agent from the mesh
    Delete { name: String },
    /// Remove every registered agent
    Cleanup,
    /// List registered agents
    List,
    /// Show a single agent's manifest
    Get { name: String },
}

pub async fn run(client: &MeshClient, args: AgentArgs) -> Result<()> {
    let body = match args.command {
        AgentCommand::Register { name, agent_type, base_url, auth_token, capabilities } => {
            client
                .post(
                    "/platform/agents/register",
                    &serde_json::json!({
                        "agent_name": name,
                        "agent_type": agent_type,
                        "base_url": base_url,
                        "auth_token": auth_token,
                        "capabilities": capabilities,
                    }),
                )
                .await?
        }
        AgentCommand::Delete { name } => client.delete(&format!("/platform/agents/{name}")).await?,
        AgentCommand::Cleanup => client.delete("/platform/agents/cleanup").await?,
        AgentCommand::List => client.get("/agents").await?,
        AgentCommand::Get { name } => client.get(&format!("/agents/{name}")).await?,
    };
    println!("{}", serde_json::to_string_pretty(&body)?);
    Ok(())
}
