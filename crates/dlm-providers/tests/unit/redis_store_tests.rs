//! Redis lock store tests
//!
//! Tests marked `#[ignore]` require a Redis server on localhost:6379:
//! `cargo test -p dlm-providers --test unit redis -- --ignored`

use dlm_domain::ports::LockStore;
use dlm_domain::token::generate_token;
use dlm_providers::store::RedisLockStore;
use std::time::Duration;

fn unique_key() -> String {
    format!("dlm-test:{}", generate_token())
}

#[test]
fn test_redis_store_creation() {
    assert!(RedisLockStore::new("redis://localhost:6379").is_ok());
    assert!(RedisLockStore::new("invalid://url").is_err());
}

#[test]
fn test_command_timeout_override() {
    let store = RedisLockStore::with_host_port("localhost", 6379)
        .unwrap()
        .with_command_timeout(Duration::from_millis(250));
    assert_eq!(store.command_timeout(), Duration::from_millis(250));
}

#[tokio::test]
async fn test_unreachable_server_reports_error() {
    // Port 1 is never a Redis server
    let store = RedisLockStore::new("redis://127.0.0.1:1")
        .unwrap()
        .with_command_timeout(Duration::from_millis(500));
    let result = store
        .set_if_absent("lock:a", "t1", Duration::from_secs(1))
        .await;
    assert!(result.is_err());
}

#[tokio::test]
#[ignore = "requires a running Redis server"]
async fn test_redis_set_if_absent_and_release() {
    let store = RedisLockStore::with_host_port("localhost", 6379).unwrap();
    let key = unique_key();
    let lease = Duration::from_secs(5);

    assert!(store.set_if_absent(&key, "t1", lease).await.unwrap());
    assert!(!store.set_if_absent(&key, "t2", lease).await.unwrap());
    assert!(!store.compare_and_delete(&key, "t2").await.unwrap());
    assert!(store.compare_and_delete(&key, "t1").await.unwrap());
    assert!(!store.compare_and_delete(&key, "t1").await.unwrap());
}

#[tokio::test]
#[ignore = "requires a running Redis server"]
async fn test_redis_acquire_or_refresh_and_extend() {
    let store = RedisLockStore::with_host_port("localhost", 6379).unwrap();
    let key = unique_key();
    let lease = Duration::from_secs(5);

    assert!(store.acquire_or_refresh(&key, "t1", lease).await.unwrap());
    assert!(store.acquire_or_refresh(&key, "t1", lease).await.unwrap());
    assert!(!store.acquire_or_refresh(&key, "t2", lease).await.unwrap());

    assert!(store.compare_and_extend(&key, "t1", lease).await.unwrap());
    assert!(!store.compare_and_extend(&key, "t2", lease).await.unwrap());

    assert!(store.compare_and_delete(&key, "t1").await.unwrap());
}

#[tokio::test]
#[ignore = "requires a running Redis server"]
async fn test_redis_lease_expires() {
    let store = RedisLockStore::with_host_port("localhost", 6379).unwrap();
    let key = unique_key();

    assert!(
        store
            .set_if_absent(&key, "t1", Duration::from_millis(100))
            .await
            .unwrap()
    );
    tokio::time::sleep(Duration::from_millis(250)).await;
    assert!(
        store
            .set_if_absent(&key, "t2", Duration::from_secs(1))
            .await
            .unwrap()
    );
    assert!(store.compare_and_delete(&key, "t2").await.unwrap());
}
