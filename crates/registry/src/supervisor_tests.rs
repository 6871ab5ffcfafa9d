use super::*;
use mesh_core::{AgentRegistration, FakeClock};
use mesh_rpc::FakeAgentRpcClient;
use mesh_store::InMemoryStore;
use std::time::Duration;

fn registration(name: &str, base_url: &str) -> AgentRegistration {
    AgentRegistration {
        agent_name: name.to_string(),
        agent_type: "custom".to_string(),
        base_url: base_url.to_string(),
        auth_token: "tok".to_string(),
        version: "1.0.0".to_string(),
        port: None,
        capabilities: vec!["text_generation".to_string()],
        tags: Vec::new(),
        description: String::new(),
        contact: String::new(),
        metadata: Default::default(),
        input_content_types: vec!["*/*".to_string()],
        output_content_types: vec!["*/*".to_string()],
    }
}

fn harness() -> (Arc<Registry>, Arc<FakeAgentRpcClient>) {
    let registry = Arc::new(Registry::new(Arc::new(InMemoryStore::new()), Arc::new(FakeClock::new())));
    let rpc = Arc::new(FakeAgentRpcClient::new());
    (registry, rpc)
}

#[tokio::test(start_paused = true)]
async fn prober_evicts_agent_after_max_failures() {
    let (registry, rpc) = harness();
    registry.register(registration("agent-a", "http://agent-a")).await.unwrap();
    rpc.set_reachable("http://agent-a", false);

    let supervisor = LivenessSupervisor::new(
        registry.clone(),
        rpc.clone(),
        SupervisorConfig { ping_interval: Duration::from_millis(10), max_failures: 3 },
    );
    supervisor.spawn("agent-a", AgentTarget { base_url: "http://agent-a".to_string(), auth_token: "tok".to_string() });

    for _ in 0..10 {
        tokio::time::advance(Duration::from_millis(10)).await;
        tokio::task::yield_now().await;
        if registry.get("agent-a").await.unwrap().is_none() {
            break;
        }
    }

    assert!(registry.get("agent-a").await.unwrap().is_none());
    assert!(!supervisor.has_prober("agent-a"));
}

#[tokio::test(start_paused = true)]
async fn prober_keeps_agent_active_while_reachable() {
    let (registry, rpc) = harness();
    registry.register(registration("agent-a", "http://agent-a")).await.unwrap();
    rpc.set_reachable("http://agent-a", true);

    let supervisor = LivenessSupervisor::new(
        registry.clone(),
        rpc.clone(),
        SupervisorConfig { ping_interval: Duration::from_millis(10), max_failures: 3 },
    );
    supervisor.spawn("agent-a", AgentTarget { base_url: "http://agent-a".to_string(), auth_token: "tok".to_string() });

    for _ in 0..5 {
        tokio::time::advance(Duration::from_millis(10)).await;
        tokio::task::yield_now().await;
    }

    let record = registry.get("agent-a").await.unwrap().unwrap();
    assert_eq!(record.status, mesh_core::AgentStatus::Active);
    assert!(supervisor.has_prober("agent-a"));
    supervisor.cancel_all();
    assert_eq!(supervisor.prober_count(), 0);
}

#[tokio::test]
async fn spawn_is_idempotent_and_cancels_prior_prober() {
    let (registry, rpc) = harness();
    registry.register(registration("agent-a", "http://agent-a")).await.unwrap();
    rpc.set_reachable("http://agent-a", true);

    let supervisor = LivenessSupervisor::new(
        registry.clone(),
        rpc.clone(),
        SupervisorConfig { ping_interval: Duration::from_secs(3600), max_failures: 3 },
    );
    let target = AgentTarget { base_url: "http://agent-a".to_string(), auth_token: "tok".to_string() };
    supervisor.spawn("agent-a", target.clone());
    supervisor.spawn("agent-a", target);
    assert_eq!(supervisor.prober_count(), 1);
}

#[tokio::test]
async fn restore_spawns_probers_for_reachable_agents_and_marks_others_inactive() {
    let (registry, rpc) = harness();
    registry.register(registration("agent-a", "http://agent-a")).await.unwrap();
    registry.register(registration("agent-b", "http://agent-b")).await.unwrap();
    rpc.set_reachable("http://agent-a", true);
    rpc.set_reachable("http://agent-b", false);

    let supervisor = LivenessSupervisor::new(
        registry.clone(),
        rpc.clone(),
        SupervisorConfig { ping_interval: Duration::from_secs(3600), max_failures: 3 },
    );
    supervisor.restore().await.unwrap();

    assert!(supervisor.has_prober("agent-a"));
    assert!(!supervisor.has_prober("agent-b"));
    assert_eq!(
        registry.get("agent-b").await.unwrap().unwrap().status,
        mesh_core::AgentStatus::Inactive
    );
    assert!(registry.get("agent-b").await.unwrap().is_some());
    supervisor.cancel_all();
}
