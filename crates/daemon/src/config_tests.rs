use super::*;
use serial_test::serial;

fn clear_env() {
    for key in [
        "MESH_BIND_HOST",
        "MESH_BIND_PORT",
        "MESH_PING_INTERVAL_MS",
        "MESH_MAX_FAILURES",
        "MESH_RETRY_COUNT",
        "MESH_RETRY_DELAY_MS",
        "MESH_PROBE_TIMEOUT_MS",
        "MESH_INVOKE_TIMEOUT_MS",
        "MESH_STORE_ADDR",
    ] {
        std::env::remove_var(key);
    }
}

#[test]
#[serial]
fn defaults_apply_when_unset() {
    clear_env();
    let config = Config::load();
    assert_eq!(config.bind_addr(), "0.0.0.0:8080");
    assert_eq!(config.ping_interval, Duration::from_secs(3));
    assert_eq!(config.max_failures, 3);
    assert_eq!(config.retry_count, 3);
    assert_eq!(config.retry_delay, Duration::from_secs(1));
    assert_eq!(config.probe_timeout, Duration::from_secs(2));
    assert_eq!(config.invoke_timeout, Duration::from_secs(30));
    assert!(config.store_addr.is_none());
}

#[test]
#[serial]
fn explicit_vars_override_defaults() {
    clear_env();
    std::env::set_var("MESH_BIND_HOST", "127.0.0.1");
    std::env::set_var("MESH_BIND_PORT", "9090");
    std::env::set_var("MESH_MAX_FAILURES", "5");

    let config = Config::load();
    assert_eq!(config.bind_addr(), "127.0.0.1:9090");
    assert_eq!(config.max_failures, 5);

    clear_env();
}

#[test]
#[serial]
fn invalid_var_falls_back_to_default() {
    clear_env();
    std::env::set_var("MESH_BIND_PORT", "not-a-port");

    let config = Config::load();
    assert_eq!(config.bind_port, 8080);

    clear_env();
}
