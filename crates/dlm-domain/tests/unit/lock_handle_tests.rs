//! Unit tests for the lock handle entity

use dlm_domain::{HandleState, LockHandle};

#[test]
fn test_new_handle_is_live() {
    let handle = LockHandle::new("lock:job-42", "t1");
    assert_eq!(handle.key(), "lock:job-42");
    assert_eq!(handle.token(), "t1");
    assert_eq!(handle.state(), HandleState::Live);
    assert!(!handle.has_empty_field());
}

#[test]
fn test_stop_transitions_once() {
    let handle = LockHandle::new("lock:job-42", "t1");
    assert!(handle.stop());
    assert!(!handle.stop());
    assert!(handle.is_stopped());
}

#[test]
fn test_clones_share_stopped_flag() {
    let handle = LockHandle::new("lock:job-42", "t1");
    let renewal_copy = handle.clone();

    handle.stop();
    assert_eq!(renewal_copy.state(), HandleState::Stopped);
}

#[test]
fn test_empty_fields_detected() {
    assert!(LockHandle::new("", "t1").has_empty_field());
    assert!(LockHandle::new("lock:a", "").has_empty_field());
}

#[test]
fn test_equality_ignores_state() {
    let a = LockHandle::new("lock:a", "t1");
    let b = LockHandle::new("lock:a", "t1");
    a.stop();
    assert_eq!(a, b);
    assert_ne!(a, LockHandle::new("lock:a", "t2"));
}
