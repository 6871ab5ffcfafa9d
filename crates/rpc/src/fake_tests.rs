use super::*;

fn target(base_url: &str) -> AgentTarget {
    AgentTarget { base_url: base_url.to_string(), auth_token: "tok".to_string() }
}

#[tokio::test]
async fn probe_returns_scripted_reachability() {
    let client = FakeAgentRpcClient::new();
    client.set_reachable("http://agent-a", true);

    assert!(client.probe(&target("http://agent-a")).await);
    assert!(!client.probe(&target("http://agent-b")).await);
}

#[tokio::test]
async fn invoke_returns_scripted_response_and_records_calls() {
    let client = FakeAgentRpcClient::new();
    client.set_invoke_response("agent-a", vec![RpcMessage::new("done")]);

    let output = client
        .invoke(&target("http://agent-a"), "agent-a", vec![RpcMessage::new("go")])
        .await
        .unwrap();
    assert_eq!(output, vec![RpcMessage::new("done")]);

    let calls = client.calls();
    assert_eq!(calls.len(), 1);
    assert!(matches!(&calls[0], RpcCall::Invoke { agent_name, .. } if agent_name == "agent-a"));
}

#[tokio::test]
async fn invoke_returns_scripted_failure() {
    let client = FakeAgentRpcClient::new();
    client.set_invoke_failure("agent-a", 500);

    let err = client
        .invoke(&target("http://agent-a"), "agent-a", vec![RpcMessage::new("go")])
        .await
        .unwrap_err();
    assert!(matches!(err, RpcError::Status { status: 500, .. }));
}
