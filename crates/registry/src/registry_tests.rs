use super::*;
use mesh_core::FakeClock;
use mesh_store::InMemoryStore;

fn registration(name: &str) -> AgentRegistration {
    AgentRegistration {
        agent_name: name.to_string(),
        agent_type: "custom".to_string(),
        base_url: "http://localhost:9000".to_string(),
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

fn registry() -> Registry {
    Registry::new(Arc::new(InMemoryStore::new()), Arc::new(FakeClock::new()))
}

#[tokio::test]
async fn register_then_get_roundtrips() {
    let reg = registry();
    let record = reg.register(registration("agent-a")).await.unwrap();
    assert_eq!(record.status, AgentStatus::Active);

    let fetched = reg.get("agent-a").await.unwrap().unwrap();
    assert_eq!(fetched.agent_name, "agent-a");
    assert_eq!(fetched.capabilities, vec!["text_generation".to_string()]);
}

#[tokio::test]
async fn register_rejects_duplicate_name_even_if_inactive() {
    let reg = registry();
    reg.register(registration("agent-a")).await.unwrap();
    reg.update_status("agent-a", AgentStatus::Inactive).await.unwrap();

    let err = reg.register(registration("agent-a")).await.unwrap_err();
    assert!(matches!(err, RegistryError::AlreadyExists(name) if name == "agent-a"));
}

#[tokio::test]
async fn register_rejects_invalid_registration() {
    let reg = registry();
    let mut bad = registration("agent-a");
    bad.capabilities.clear();
    let err = reg.register(bad).await.unwrap_err();
    assert!(matches!(err, RegistryError::InvalidRegistration(_)));
}

#[tokio::test]
async fn list_returns_every_registered_agent() {
    let reg = registry();
    reg.register(registration("agent-a")).await.unwrap();
    reg.register(registration("agent-b")).await.unwrap();

    let mut names: Vec<_> = reg.list().await.unwrap().into_iter().map(|r| r.agent_name).collect();
    names.sort();
    assert_eq!(names, vec!["agent-a".to_string(), "agent-b".to_string()]);
}

#[tokio::test]
async fn delete_removes_from_both_hash_and_index() {
    let reg = registry();
    reg.register(registration("agent-a")).await.unwrap();
    assert!(reg.delete("agent-a").await.unwrap());
    assert!(reg.get("agent-a").await.unwrap().is_none());
    assert!(reg.list().await.unwrap().is_empty());
    assert!(!reg.delete("agent-a").await.unwrap());
}

#[tokio::test]
async fn update_status_stamps_last_verified() {
    let reg = registry();
    reg.register(registration("agent-a")).await.unwrap();
    reg.update_status("agent-a", AgentStatus::Inactive).await.unwrap();

    let record = reg.get("agent-a").await.unwrap().unwrap();
    assert_eq!(record.status, AgentStatus::Inactive);
}

#[tokio::test]
async fn update_status_on_unknown_agent_fails() {
    let reg = registry();
    let err = reg.update_status("ghost", AgentStatus::Active).await.unwrap_err();
    assert!(matches!(err, RegistryError::NotFound(_)));
}

#[tokio::test]
async fn cleanup_all_empties_the_registry() {
    let reg = registry();
    reg.register(registration("agent-a")).await.unwrap();
    reg.register(registration("agent-b")).await.unwrap();
    reg.cleanup_all().await.unwrap();
    assert!(reg.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn force_register_overwrites_stale_record() {
    let reg = registry();
    reg.register(registration("agent-a")).await.unwrap();

    let mut updated = registration("agent-a");
    updated.base_url = "http://localhost:9999".to_string();
    let record = reg.force_register(updated).await.unwrap();
    assert_eq!(record.base_url, "http://localhost:9999");
}
