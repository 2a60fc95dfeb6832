//! Bootstrap tests: configuration to a working lock service

use dlm_domain::value_objects::{AcquireOnceParams, LockFailure};
use dlm_infrastructure::bootstrap::{build_lock_service, build_store_clients};
use dlm_infrastructure::config::{AppConfig, StoreConfig};
use std::time::Duration;

#[tokio::test]
async fn test_default_config_builds_memory_service() {
    let service = build_lock_service(&AppConfig::default()).unwrap();

    let acquisition = service
        .lock_once(AcquireOnceParams::new("job-42", Duration::from_secs(5)))
        .await;
    assert!(acquisition.is_success());
    assert_eq!(acquisition.handle.key(), "lock:job-42");

    let contender = service
        .lock_once(AcquireOnceParams::new("job-42", Duration::from_secs(5)))
        .await;
    assert_eq!(contender.result, Err(LockFailure::AlreadyExists));

    service.unlock(&acquisition.handle).await.unwrap();
}

#[test]
fn test_named_stores_are_registered() {
    let mut config = AppConfig::default();
    config
        .stores
        .insert("replica".to_string(), StoreConfig::new("memory"));
    // Redis clients connect lazily, so building needs no server
    config.stores.insert(
        "primary".to_string(),
        StoreConfig::new("redis").with_uri("redis://127.0.0.1:1"),
    );

    let clients = build_store_clients(&config).unwrap();
    assert_eq!(clients.names(), vec!["primary", "replica"]);
}

#[tokio::test]
async fn test_configured_client_and_prefix_are_applied() {
    let mut config = AppConfig::default();
    config.lock.prefix = "billing".to_string();
    config.lock.client_name = Some("replica".to_string());
    config
        .stores
        .insert("replica".to_string(), StoreConfig::new("memory"));

    let service = build_lock_service(&config).unwrap();
    assert_eq!(service.options().client_name(), Some("replica"));

    let acquisition = service
        .lock_once(AcquireOnceParams::new("invoice-7", Duration::from_secs(5)))
        .await;
    assert!(acquisition.is_success());
    assert_eq!(acquisition.handle.key(), "billing:invoice-7");
}

#[test]
fn test_unknown_provider_is_rejected() {
    let mut config = AppConfig::default();
    config
        .stores
        .insert("default".to_string(), StoreConfig::new("etcd"));

    let err = build_lock_service(&config).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("Store 'default'"), "{message}");
    assert!(message.contains("Unknown lock store provider 'etcd'"), "{message}");
}
