// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

pub const AGENTS_SET: &str = "agents";

pub fn agent_hash(name: &str) -> String {
    format!("agent:{name}")
}
