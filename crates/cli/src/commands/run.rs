// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `meshctl run` - single-agent invocation outside of any flow

use crate::client::MeshClient;
use anyhow::Result;
use clap::Args;

#[derive(Args)]
pub struct RunArgs {
    /// Name of the registered agent to invoke
    agent_name: String,
    /// JSON-encoded input payload, defaults to `{}`
    #[arg(long)]
    input: Option<String>,
}

pub async fn run(client: &MeshClient, args: RunArgs) -> Result<()> {
    let input: serde_json::Value = match args.input {
        Some(raw) => serde_json::from_str(&raw)?,
        None => serde_json::json!({}),
    };
    let body = client
        .post("/runs", &serde_json::json!({ "agent_name": args.agent_name, "input": input }))
        .await?;
    println!("{}", serde_json::to_string_pretty(&body)?);
    Ok(())
}
