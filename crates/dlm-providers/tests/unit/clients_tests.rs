//! Store client selection tests

use dlm_domain::Error;
use dlm_domain::ports::{LockStore, LockStoreProvider};
use dlm_providers::LockStoreClients;
use dlm_providers::store::InMemoryLockStore;
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn test_default_and_named_clients_are_distinct() {
    let default = InMemoryLockStore::new();
    let replica = InMemoryLockStore::new();
    let clients = LockStoreClients::new(Arc::new(default.clone()))
        .with_client("replica", Arc::new(replica.clone()));

    let store = clients.get_client(Some("replica")).unwrap();
    store
        .set_if_absent("lock:a", "t1", Duration::from_secs(1))
        .await
        .unwrap();

    assert_eq!(replica.current_token("lock:a").as_deref(), Some("t1"));
    assert_eq!(default.current_token("lock:a"), None);
}

#[test]
fn test_default_name_resolves_default_client() {
    let clients = LockStoreClients::new(Arc::new(InMemoryLockStore::new()));
    assert!(clients.get_client(None).is_ok());
    assert!(clients.get_client(Some("default")).is_ok());
}

#[test]
fn test_unknown_client_is_not_found() {
    let clients = LockStoreClients::new(Arc::new(InMemoryLockStore::new()));
    match clients.get_client(Some("missing")) {
        Err(Error::NotFound { resource }) => assert!(resource.contains("missing")),
        other => panic!("Expected NotFound, got {:?}", other.map(|s| s.provider_name().to_string())),
    }
}

#[test]
fn test_names_sorted() {
    let clients = LockStoreClients::new(Arc::new(InMemoryLockStore::new()))
        .with_client("zeta", Arc::new(InMemoryLockStore::new()))
        .with_client("alpha", Arc::new(InMemoryLockStore::new()));
    assert_eq!(clients.names(), vec!["alpha", "zeta"]);
}
