use crate::test_support::{registration, send, test_state};
use crate::build_router;
use axum::http::StatusCode;
use mesh_rpc::RpcMessage;

#[tokio::test]
async fn run_invokes_registered_agent_and_returns_output() {
    let (state, rpc) = test_state();
    state.registry.register(registration("agent-a")).await.unwrap();
    rpc.set_invoke_response("agent-a", vec![RpcMessage::new(serde_json::json!({ "ok": true }).to_string())]);
    let router = build_router(state);

    let (status, body) = send(router, "POST", "/runs", Some(serde_json::json!({ "agent_name": "agent-a", "input": {} }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "completed");
    assert_eq!(body["output"]["ok"], true);
}

#[tokio::test]
async fn run_rejects_missing_agent_name() {
    let (state, _rpc) = test_state();
    let router = build_router(state);

    let (status, _body) = send(router, "POST", "/runs", Some(serde_json::json!({ "agent_name": "" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn run_against_unknown_agent_is_404() {
    let (state, _rpc) = test_state();
    let router = build_router(state);

    let (status, _body) = send(router, "POST", "/runs", Some(serde_json::json!({ "agent_name": "ghost" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn run_surfaces_invoke_failure_as_internal_error() {
    let (state, rpc) = test_state();
    state.registry.register(registration("agent-a")).await.unwrap();
    rpc.set_invoke_failure("agent-a", 503);
    let router = build_router(state);

    let (status, _body) = send(router, "POST", "/runs", Some(serde_json::json!({ "agent_name": "agent-a" }))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}
