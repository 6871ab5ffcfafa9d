use crate::test_support::{registration, send, test_state};
use crate::{build_router, AppState};
use axum::http::StatusCode;
use mesh_core::FlowAgentEntry;

fn entry(name: &str, upstream: &[&str], required: bool) -> FlowAgentEntry {
    FlowAgentEntry {
        agent_name: name.to_string(),
        upstream_agents: upstream.iter().map(|s| s.to_string()).collect(),
        required,
        description: String::new(),
        added_at: String::new(),
    }
}

fn router() -> (axum::Router, AppState, mesh_rpc::FakeAgentRpcClient) {
    let (state, rpc) = test_state();
    (build_router(state.clone()), state, rpc)
}

#[tokio::test]
async fn create_then_list_then_get_flow() {
    let (router, _state, _rpc) = router();
    let body = serde_json::json!({ "name": "pipeline-a", "agents": [] });
    let (status, created) = send(router.clone(), "POST", "/flows", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    let flow_id = created["flow_id"].as_str().unwrap().to_string();

    let (status, listed) = send(router.clone(), "GET", "/flows", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed["flows"].as_array().unwrap().len(), 1);

    let (status, fetched) = send(router, "GET", &format!("/flows/{flow_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["name"], "pipeline-a");
}

#[tokio::test]
async fn create_rejects_empty_name() {
    let (router, _state, _rpc) = router();
    let (status, _body) = send(router, "POST", "/flows", Some(serde_json::json!({ "name": "" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn get_missing_flow_is_404() {
    let (router, _state, _rpc) = router();
    let (status, _body) = send(router, "GET", "/flows/ghost", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_flow_then_404_on_refetch() {
    let (router, state, _rpc) = router();
    let flow = state.flow_store.create_flow("to-delete".to_string(), String::new(), vec![], None).await.unwrap();

    let (status, _body) = send(router.clone(), "DELETE", &format!("/flows/{}", flow.flow_id), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _body) = send(router, "GET", &format!("/flows/{}", flow.flow_id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn add_then_remove_flow_agent() {
    let (router, state, _rpc) = router();
    let flow = state.flow_store.create_flow("wiring".to_string(), String::new(), vec![], None).await.unwrap();

    let (status, added) = send(
        router.clone(),
        "POST",
        &format!("/flows/{}/agents", flow.flow_id),
        Some(serde_json::to_value(entry("a", &[], true)).unwrap()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(added["agents"].as_array().unwrap().len(), 1);

    let (status, removed) = send(router, "DELETE", &format!("/flows/{}/agents/a", flow.flow_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(removed["agents"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn execute_flow_runs_to_completion() {
    let (router, state, rpc) = router();
    let flow = state
        .flow_store
        .create_flow("single".to_string(), String::new(), vec![entry("a", &[], true)], None)
        .await
        .unwrap();
    state.registry.register(registration("a")).await.unwrap();
    rpc.set_reachable("http://a", true);

    let (status, body) = send(router, "POST", &format!("/flows/{}/execute", flow.flow_id), Some(serde_json::json!({ "input": {} }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["status"], "completed");
}

#[tokio::test]
async fn execute_missing_flow_is_404() {
    let (router, _state, _rpc) = router();
    let (status, _body) = send(router, "POST", "/flows/ghost/execute", Some(serde_json::json!({}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_and_get_executions() {
    let (router, state, rpc) = router();
    let flow = state
        .flow_store
        .create_flow("traced".to_string(), String::new(), vec![entry("a", &[], true)], None)
        .await
        .unwrap();
    state.registry.register(registration("a")).await.unwrap();
    rpc.set_reachable("http://a", true);

    let (_status, exec) = send(router.clone(), "POST", &format!("/flows/{}/execute", flow.flow_id), Some(serde_json::json!({}))).await;
    let execution_id = exec["result"]["execution_id"].as_str().unwrap().to_string();

    let (status, listed) = send(router.clone(), "GET", &format!("/flows/{}/executions", flow.flow_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed["executions"].as_array().unwrap().len(), 1);

    let (status, fetched) = send(router, "GET", &format!("/flows/{}/executions/{execution_id}", flow.flow_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["execution_id"], execution_id);
}

#[tokio::test]
async fn export_then_import_round_trips() {
    let (router, state, _rpc) = router();
    let flow = state
        .flow_store
        .create_flow("exportable".to_string(), "desc".to_string(), vec![entry("a", &[], true)], None)
        .await
        .unwrap();

    let (status, exported) = send(router.clone(), "GET", &format!("/flows/{}/export", flow.flow_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(exported["name"], "exportable");

    state.flow_store.delete_flow(flow.flow_id.as_str()).await.unwrap();

    let import_body = serde_json::json!({
        "name": exported["name"],
        "description": exported["description"],
        "agents": exported["agents"],
    });
    let (status, imported) = send(router, "POST", "/flows/import", Some(import_body)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(imported["warnings"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn import_without_overwrite_conflicts_on_existing_name() {
    let (router, state, _rpc) = router();
    state.flow_store.create_flow("taken".to_string(), String::new(), vec![], None).await.unwrap();

    let (status, _body) = send(router, "POST", "/flows/import", Some(serde_json::json!({ "name": "taken" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn import_with_overwrite_replaces_existing_flow() {
    let (router, state, _rpc) = router();
    state.flow_store.create_flow("taken".to_string(), String::new(), vec![], None).await.unwrap();

    let (status, body) = send(
        router,
        "POST",
        "/flows/import",
        Some(serde_json::json!({ "name": "taken", "overwrite_existing": true })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["warnings"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn import_with_validation_surfaces_unregistered_agent_warning() {
    let (router, state, _rpc) = router();
    state
        .registry
        .register(registration("known"))
        .await
        .unwrap();

    let import_body = serde_json::json!({
        "name": "validated",
        "validate_agents": true,
        "agents": [
            { "agent_name": "known", "upstream_agents": [], "required": true, "description": "" },
            { "agent_name": "unknown", "upstream_agents": [], "required": true, "description": "" },
        ],
    });
    let (status, body) = send(router, "POST", "/flows/import", Some(import_body)).await;
    assert_eq!(status, StatusCode::CREATED);
    let warnings = body["warnings"].as_array().unwrap();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0], "agent 'unknown' is not currently registered");
}
