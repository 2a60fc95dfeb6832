//! Release and lease extension tests

use crate::support::{Reply, ScriptedStore, memory_service, service_over};
use dlm_domain::entities::{HandleState, LockHandle};
use dlm_domain::value_objects::{AcquireOnceParams, LockFailure};
use std::sync::Arc;
use std::time::Duration;

const LEASE: Duration = Duration::from_millis(1000);

#[tokio::test]
async fn test_unlock_then_unlock_again_is_stopped() {
    let (service, store) = memory_service();
    let handle = service
        .lock_once(AcquireOnceParams::new("job-42", LEASE))
        .await
        .into_result()
        .unwrap();

    assert_eq!(service.unlock(&handle).await, Ok(()));
    assert!(store.current_token("lock:job-42").is_none());
    assert_eq!(handle.state(), HandleState::Stopped);

    let again = service.unlock(&handle).await;
    assert_eq!(again, Err(LockFailure::Stopped));
    assert_eq!(again.unwrap_err().to_string(), "lock is stop");
}

#[tokio::test]
async fn test_release_frees_name_for_next_acquirer() {
    let (service, _store) = memory_service();
    let handle = service
        .lock_once(AcquireOnceParams::new("job-42", LEASE))
        .await
        .into_result()
        .unwrap();
    service.unlock(&handle).await.unwrap();

    let next = service
        .lock_once(AcquireOnceParams::new("job-42", LEASE))
        .await;
    assert!(next.is_success());
}

#[tokio::test]
async fn test_foreign_token_cannot_release_or_extend() {
    let (service, store) = memory_service();
    let owner = service
        .lock_once(AcquireOnceParams::new("job-42", LEASE).with_token("owner"))
        .await
        .into_result()
        .unwrap();

    let intruder = LockHandle::new("lock:job-42", "intruder");
    assert_eq!(
        service.extend(&intruder, LEASE).await,
        Err(LockFailure::NotMatched)
    );
    assert!(!intruder.is_stopped());

    let released = service.unlock(&intruder).await;
    assert_eq!(released, Err(LockFailure::NotMatched));
    assert_eq!(
        released.unwrap_err().to_string(),
        "lockVal not match or lock not exist"
    );
    // Released or not, a handle is done once it has reached the store
    assert!(intruder.is_stopped());
    assert_eq!(store.current_token("lock:job-42").as_deref(), Some("owner"));
    assert!(!owner.is_stopped());
}

#[tokio::test]
async fn test_empty_fields_fail_before_store() {
    let store = Arc::new(ScriptedStore::new(Reply::Done(true)));
    let service = service_over(store.clone());

    for handle in [LockHandle::new("", "t1"), LockHandle::new("lock:job-42", "")] {
        assert_eq!(service.unlock(&handle).await, Err(LockFailure::FieldEmpty));
        assert_eq!(
            service.extend(&handle, LEASE).await,
            Err(LockFailure::FieldEmpty)
        );
        assert!(!handle.is_stopped());
    }
    assert_eq!(store.release_calls(), 0);
    assert_eq!(store.extend_calls(), 0);
}

#[tokio::test]
async fn test_store_error_on_release_still_stops_handle() {
    let store = Arc::new(ScriptedStore::new(Reply::Fail("connection reset")));
    let service = service_over(store.clone());
    let handle = LockHandle::new("lock:job-42", "t1");

    let released = service.unlock(&handle).await;
    assert_eq!(
        released,
        Err(LockFailure::Transport {
            message: "connection reset".to_string(),
            timed_out: false,
        })
    );
    assert!(handle.is_stopped());
    assert_eq!(store.release_calls(), 1);
}

#[tokio::test]
async fn test_release_timeout_is_reported() {
    let store = Arc::new(ScriptedStore::new(Reply::Timeout));
    let service = service_over(store);
    let handle = LockHandle::new("lock:job-42", "t1");

    let failure = service.unlock(&handle).await.unwrap_err();
    assert!(failure.is_timeout());
    assert_eq!(failure.to_string(), "Command timed out");
}

#[tokio::test(start_paused = true)]
async fn test_extend_resets_lease() {
    let (service, store) = memory_service();
    let handle = service
        .lock_once(AcquireOnceParams::new("job-42", Duration::from_millis(200)))
        .await
        .into_result()
        .unwrap();

    tokio::time::sleep(Duration::from_millis(150)).await;
    service.extend(&handle, LEASE).await.unwrap();
    tokio::time::sleep(Duration::from_millis(150)).await;

    assert_eq!(
        store.current_token("lock:job-42").as_deref(),
        Some(handle.token())
    );
    assert!(store.remaining_ttl("lock:job-42").unwrap() > Duration::from_millis(800));
}

#[tokio::test(start_paused = true)]
async fn test_failed_extend_keeps_handle_live() {
    let (service, _store) = memory_service();
    let handle = service
        .lock_once(AcquireOnceParams::new("job-42", Duration::from_millis(100)))
        .await
        .into_result()
        .unwrap();

    tokio::time::sleep(Duration::from_millis(150)).await;

    assert_eq!(
        service.extend(&handle, LEASE).await,
        Err(LockFailure::NotMatched)
    );
    assert!(!handle.is_stopped());
}

#[tokio::test]
async fn test_extend_on_stopped_handle_skips_store() {
    let store = Arc::new(ScriptedStore::new(Reply::Done(true)));
    let service = service_over(store.clone());
    let handle = LockHandle::new("lock:job-42", "t1");
    handle.stop();

    assert_eq!(
        service.extend(&handle, LEASE).await,
        Err(LockFailure::Stopped)
    );
    assert_eq!(store.extend_calls(), 0);
}

#[tokio::test]
async fn test_unlock_through_clone_stops_original() {
    let (service, _store) = memory_service();
    let handle = service
        .lock_once(AcquireOnceParams::new("job-42", LEASE))
        .await
        .into_result()
        .unwrap();
    let clone = handle.clone();

    service.unlock(&clone).await.unwrap();
    assert!(handle.is_stopped());
    assert_eq!(
        service.extend(&handle, LEASE).await,
        Err(LockFailure::Stopped)
    );
}
