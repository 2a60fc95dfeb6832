//! In-memory lock store
//!
//! Single-process implementation of the lock store port, for tests and
//! single-instance deployments.
//!
//! ## Features
//!
//! - Per-key atomicity through `DashMap` entry locking
//! - Lazy lease expiry measured on `tokio::time::Instant`, so paused test
//!   clocks drive expiry deterministically
//! - Expired entries are evicted when a compare operation finds them, and
//!   by a sweep run from acquisitions at most once per [`SWEEP_INTERVAL`]
//!
//! ## Example
//!
//! ```ignore
//! use dlm_providers::store::InMemoryLockStore;
//!
//! let store = InMemoryLockStore::new();
//! ```

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use dlm_domain::error::{Error, Result};
use dlm_domain::ports::LockStore;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::time::Instant;

/// Minimum time between two sweeps of expired entries
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(1);

/// Value stored under a lock key
#[derive(Debug, Clone)]
struct LeaseEntry {
    token: String,
    expires_at: Instant,
}

impl LeaseEntry {
    fn new(token: &str, ttl: Duration) -> Self {
        Self {
            token: token.to_string(),
            expires_at: Instant::now() + ttl,
        }
    }

    fn is_live(&self) -> bool {
        Instant::now() < self.expires_at
    }

    fn is_held_by(&self, token: &str) -> bool {
        self.is_live() && self.token == token
    }
}

fn check_ttl(ttl: Duration) -> Result<()> {
    if ttl.is_zero() {
        return Err(Error::invalid_argument("invalid expire time"));
    }
    Ok(())
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Schedule of the expired-entry sweep, in milliseconds since `origin`
#[derive(Debug)]
struct SweepClock {
    origin: Instant,
    next_ms: AtomicU64,
}

impl SweepClock {
    fn new() -> Self {
        Self {
            origin: Instant::now(),
            next_ms: AtomicU64::new(millis(SWEEP_INTERVAL)),
        }
    }

    /// Claim the sweep if it is due; only one caller wins per interval
    fn claim(&self) -> bool {
        let now_ms = millis(self.origin.elapsed());
        let due_ms = self.next_ms.load(Ordering::Acquire);
        now_ms >= due_ms
            && self
                .next_ms
                .compare_exchange(
                    due_ms,
                    now_ms.saturating_add(millis(SWEEP_INTERVAL)),
                    Ordering::AcqRel,
                    Ordering::Acquire,
                )
                .is_ok()
    }
}

/// In-memory lock store
#[derive(Debug, Clone)]
pub struct InMemoryLockStore {
    entries: Arc<DashMap<String, LeaseEntry>>,
    sweep: Arc<SweepClock>,
}

impl Default for InMemoryLockStore {
    fn default() -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            sweep: Arc::new(SweepClock::new()),
        }
    }
}

impl InMemoryLockStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries, including expired ones not yet evicted
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Token currently held under `key`, if the lease is live
    pub fn current_token(&self, key: &str) -> Option<String> {
        self.entries
            .get(key)
            .filter(|entry| entry.is_live())
            .map(|entry| entry.token.clone())
    }

    /// Remaining lease of `key`, if live
    pub fn remaining_ttl(&self, key: &str) -> Option<Duration> {
        self.entries
            .get(key)
            .filter(|entry| entry.is_live())
            .map(|entry| entry.expires_at.saturating_duration_since(Instant::now()))
    }

    /// Number of live leases
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|entry| entry.is_live()).count()
    }

    /// Whether no lease is live
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop expired entries
    pub fn purge_expired(&self) {
        self.entries.retain(|_, entry| entry.is_live());
    }

    /// Sweep expired entries if the sweep is due
    ///
    /// Must not run while this task holds a map guard.
    fn sweep_if_due(&self) {
        if self.sweep.claim() {
            self.purge_expired();
        }
    }

    fn evict_if_expired(&self, key: &str) {
        self.entries.remove_if(key, |_, entry| !entry.is_live());
    }
}

#[async_trait]
impl LockStore for InMemoryLockStore {
    async fn set_if_absent(&self, key: &str, token: &str, ttl: Duration) -> Result<bool> {
        check_ttl(ttl)?;
        self.sweep_if_due();
        match self.entries.entry(key.to_string()) {
            Entry::Occupied(mut occupied) => {
                if occupied.get().is_live() {
                    return Ok(false);
                }
                occupied.insert(LeaseEntry::new(token, ttl));
                Ok(true)
            }
            Entry::Vacant(vacant) => {
                vacant.insert(LeaseEntry::new(token, ttl));
                Ok(true)
            }
        }
    }

    async fn acquire_or_refresh(&self, key: &str, token: &str, ttl: Duration) -> Result<bool> {
        check_ttl(ttl)?;
        self.sweep_if_due();
        match self.entries.entry(key.to_string()) {
            Entry::Occupied(mut occupied) => {
                let entry = occupied.get_mut();
                if entry.is_held_by(token) {
                    entry.expires_at = Instant::now() + ttl;
                    Ok(true)
                } else if entry.is_live() {
                    Ok(false)
                } else {
                    occupied.insert(LeaseEntry::new(token, ttl));
                    Ok(true)
                }
            }
            Entry::Vacant(vacant) => {
                vacant.insert(LeaseEntry::new(token, ttl));
                Ok(true)
            }
        }
    }

    async fn compare_and_delete(&self, key: &str, token: &str) -> Result<bool> {
        let removed = self
            .entries
            .remove_if(key, |_, entry| entry.is_held_by(token))
            .is_some();
        if !removed {
            self.evict_if_expired(key);
        }
        Ok(removed)
    }

    async fn compare_and_extend(&self, key: &str, token: &str, ttl: Duration) -> Result<bool> {
        check_ttl(ttl)?;
        if let Some(mut entry) = self.entries.get_mut(key)
            && entry.is_held_by(token)
        {
            entry.expires_at = Instant::now() + ttl;
            return Ok(true);
        }
        self.evict_if_expired(key);
        Ok(false)
    }

    fn provider_name(&self) -> &str {
        "memory"
    }
}

// ============================================================================
// Auto-registration via linkme distributed slice
// ============================================================================

use dlm_application::ports::registry::{LOCK_STORES, LockStoreConfig, LockStoreEntry};

/// Factory function for creating in-memory lock store instances.
fn memory_store_factory(
    _config: &LockStoreConfig,
) -> std::result::Result<Arc<dyn LockStore>, String> {
    Ok(Arc::new(InMemoryLockStore::new()))
}

#[linkme::distributed_slice(LOCK_STORES)]
static MEMORY_STORE: LockStoreEntry = LockStoreEntry {
    name: "memory",
    description: "In-process lock store (single instance only)",
    factory: memory_store_factory,
};
