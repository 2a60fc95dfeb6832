//! In-memory lock store tests

use dlm_domain::ports::LockStore;
use dlm_providers::store::InMemoryLockStore;
use dlm_providers::store::memory::SWEEP_INTERVAL;
use std::time::Duration;

const KEY: &str = "lock:job-42";
const LEASE: Duration = Duration::from_millis(1000);

#[tokio::test]
async fn test_set_if_absent_only_once() {
    let store = InMemoryLockStore::new();

    assert!(store.set_if_absent(KEY, "t1", LEASE).await.unwrap());
    assert!(!store.set_if_absent(KEY, "t2", LEASE).await.unwrap());
    // Same token is still a contender for the plain command
    assert!(!store.set_if_absent(KEY, "t1", LEASE).await.unwrap());
    assert_eq!(store.current_token(KEY).as_deref(), Some("t1"));
}

#[tokio::test(start_paused = true)]
async fn test_set_if_absent_after_expiry() {
    let store = InMemoryLockStore::new();
    assert!(store.set_if_absent(KEY, "t1", LEASE).await.unwrap());

    tokio::time::advance(LEASE + Duration::from_millis(1)).await;

    assert_eq!(store.current_token(KEY), None);
    assert!(store.set_if_absent(KEY, "t2", LEASE).await.unwrap());
    assert_eq!(store.current_token(KEY).as_deref(), Some("t2"));
}

#[tokio::test(start_paused = true)]
async fn test_acquire_or_refresh_refreshes_own_token() {
    let store = InMemoryLockStore::new();
    assert!(store.acquire_or_refresh(KEY, "t1", LEASE).await.unwrap());

    tokio::time::advance(Duration::from_millis(600)).await;
    assert!(
        store
            .acquire_or_refresh(KEY, "t1", Duration::from_millis(5000))
            .await
            .unwrap()
    );
    assert!(store.remaining_ttl(KEY).unwrap() > LEASE);

    assert!(!store.acquire_or_refresh(KEY, "t2", LEASE).await.unwrap());
}

#[tokio::test]
async fn test_compare_and_delete_requires_matching_token() {
    let store = InMemoryLockStore::new();
    store.set_if_absent(KEY, "t1", LEASE).await.unwrap();

    assert!(!store.compare_and_delete(KEY, "t2").await.unwrap());
    assert_eq!(store.current_token(KEY).as_deref(), Some("t1"));

    assert!(store.compare_and_delete(KEY, "t1").await.unwrap());
    assert!(store.is_empty());
    assert!(!store.compare_and_delete(KEY, "t1").await.unwrap());
}

#[tokio::test(start_paused = true)]
async fn test_compare_and_extend() {
    let store = InMemoryLockStore::new();
    store.set_if_absent(KEY, "t1", LEASE).await.unwrap();

    assert!(!store.compare_and_extend(KEY, "t2", LEASE).await.unwrap());
    assert!(
        store
            .compare_and_extend(KEY, "t1", Duration::from_secs(10))
            .await
            .unwrap()
    );

    tokio::time::advance(Duration::from_secs(5)).await;
    assert_eq!(store.current_token(KEY).as_deref(), Some("t1"));

    tokio::time::advance(Duration::from_secs(6)).await;
    assert!(!store.compare_and_extend(KEY, "t1", LEASE).await.unwrap());
}

#[tokio::test]
async fn test_zero_ttl_rejected() {
    let store = InMemoryLockStore::new();
    assert!(store.set_if_absent(KEY, "t1", Duration::ZERO).await.is_err());
    assert!(store.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_purge_expired() {
    let store = InMemoryLockStore::new();
    store.set_if_absent("lock:a", "t1", LEASE).await.unwrap();
    store
        .set_if_absent("lock:b", "t2", Duration::from_secs(10))
        .await
        .unwrap();

    tokio::time::advance(Duration::from_secs(2)).await;
    store.purge_expired();
    assert_eq!(store.len(), 1);
    assert_eq!(store.entry_count(), 1);
    assert_eq!(store.current_token("lock:b").as_deref(), Some("t2"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_set_if_absent_single_winner() {
    let store = InMemoryLockStore::new();

    let attempts: Vec<_> = (0..32)
        .map(|i| {
            let store = store.clone();
            tokio::spawn(async move {
                store
                    .set_if_absent(KEY, &format!("t{i}"), LEASE)
                    .await
                    .unwrap()
            })
        })
        .collect();

    let mut winners = 0;
    for attempt in attempts {
        if attempt.await.unwrap() {
            winners += 1;
        }
    }
    assert_eq!(winners, 1);
}

#[tokio::test(start_paused = true)]
async fn test_expired_entries_swept_by_later_acquisition() {
    let store = InMemoryLockStore::new();
    let short = Duration::from_millis(10);
    for i in 0..10_000 {
        let key = format!("lock:job-{i}");
        assert!(store.set_if_absent(&key, "t", short).await.unwrap());
    }
    assert_eq!(store.entry_count(), 10_000);

    tokio::time::sleep(SWEEP_INTERVAL * 2).await;
    assert!(
        store
            .set_if_absent("lock:next", "t", Duration::from_secs(5))
            .await
            .unwrap()
    );

    assert_eq!(store.len(), 1);
    assert_eq!(store.entry_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_sweep_runs_at_most_once_per_interval() {
    let store = InMemoryLockStore::new();
    tokio::time::sleep(SWEEP_INTERVAL * 2).await;

    // Due now: this call sweeps, so its own short lease is the only entry
    store
        .set_if_absent("lock:a", "t", Duration::from_millis(10))
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;

    // Not due again yet: the expired entry survives this acquisition
    store
        .set_if_absent("lock:b", "t", Duration::from_secs(5))
        .await
        .unwrap();
    assert_eq!(store.entry_count(), 2);
    assert_eq!(store.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_compare_operations_evict_expired_entry() {
    let store = InMemoryLockStore::new();
    let short = Duration::from_millis(10);
    store.set_if_absent("lock:a", "t1", short).await.unwrap();
    store.set_if_absent("lock:b", "t1", short).await.unwrap();
    tokio::time::sleep(Duration::from_millis(20)).await;

    assert!(!store.compare_and_delete("lock:a", "t1").await.unwrap());
    assert!(
        !store
            .compare_and_extend("lock:b", "t1", Duration::from_secs(1))
            .await
            .unwrap()
    );
    assert_eq!(store.entry_count(), 0);
}

#[tokio::test]
async fn test_compare_miss_keeps_live_entry() {
    let store = InMemoryLockStore::new();
    let lease = Duration::from_secs(5);
    store.set_if_absent("lock:a", "owner", lease).await.unwrap();

    assert!(!store.compare_and_delete("lock:a", "other").await.unwrap());
    assert!(!store.compare_and_extend("lock:a", "other", lease).await.unwrap());
    assert_eq!(store.current_token("lock:a").as_deref(), Some("owner"));
}
