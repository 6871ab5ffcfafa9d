// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

pub const FLOWS_SET: &str = "flows";
pub const MAX_EXECUTIONS_PER_FLOW: usize = 100;

pub fn flow_hash(flow_id: &str) -> String {
    format!("flow:{flow_id}")
}

pub fn execution_hash(flow_id: &str, execution_id: &str) -> String {
    format!("flow:{flow_id}:execution:{execution_id}")
}

pub fn executions_list(flow_id: &str) -> String {
    format!("flow:{flow_id}:executions")
}
