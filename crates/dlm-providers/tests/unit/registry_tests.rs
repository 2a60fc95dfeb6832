//! Store registry tests - providers register themselves via linkme

use dlm_application::ports::registry::{LockStoreConfig, list_lock_stores, resolve_lock_store};

#[test]
fn test_builtin_stores_registered() {
    let names: Vec<&str> = list_lock_stores().into_iter().map(|(name, _)| name).collect();
    assert!(names.contains(&"memory"));
    assert!(names.contains(&"redis"));
}

#[test]
fn test_resolve_memory_store() {
    let store = resolve_lock_store(&LockStoreConfig::new("memory")).unwrap();
    assert_eq!(store.provider_name(), "memory");
}

#[test]
fn test_resolve_redis_store_without_connecting() {
    let config = LockStoreConfig::new("redis")
        .with_uri("redis://localhost:6379")
        .with_command_timeout_ms(250);
    let store = resolve_lock_store(&config).unwrap();
    assert_eq!(store.provider_name(), "redis");
}

#[test]
fn test_unknown_provider_lists_available() {
    let err = resolve_lock_store(&LockStoreConfig::new("etcd"))
        .err()
        .unwrap();
    assert!(err.contains("etcd"));
    assert!(err.contains("memory"));
}
