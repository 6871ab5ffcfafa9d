// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! meshctl - command-line client for the agent mesh platform daemon.

mod client;
mod commands;

use client::MeshClient;
use clap::{Parser, Subcommand};
use commands::agent::AgentArgs;
use commands::flow::FlowArgs;
use commands::run::RunArgs;

#[derive(Parser)]
#[command(name = "meshctl", about = "Control the agent mesh platform daemon")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage registered agents
    Agent(AgentArgs),
    /// Manage flow definitions and executions
    Flow(FlowArgs),
    /// Invoke a single agent outside of any flow
    Run(RunArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let client = MeshClient::new();

    match cli.command {
        Commands::Agent(args) => commands::agent::run(&client, args).await,
        Commands::Flow(args) => commands::flow::run(&client, args).await,
        Commands::Run(args) => commands::run::run(&client, args).await,
    }
}
