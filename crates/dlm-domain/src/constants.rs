//! Domain layer constants
//!
//! Protocol defaults and the reason strings reported by failed lock
//! operations. Infrastructure-specific constants live in
//! `dlm_infrastructure::constants`.

// ============================================================================
// NAMING CONSTANTS
// ============================================================================

/// Namespace prepended to every logical lock name
pub const DEFAULT_LOCK_PREFIX: &str = "lock";

/// Separator between the namespace and the logical lock name
pub const LOCK_KEY_SEPARATOR: &str = ":";

// ============================================================================
// ACQUISITION CONSTANTS
// ============================================================================

/// Default lease duration in milliseconds (60 seconds)
pub const DEFAULT_LOCK_EXPIRE_MS: u64 = 60 * 1000;

/// Default delay between acquisition attempts in milliseconds
pub const DEFAULT_RETRY_INTERVAL_MS: u64 = 100;

/// Default number of retries after the first failed attempt
pub const DEFAULT_MAX_RETRY_TIMES: u32 = 600;

/// Default auto-renewal interval in milliseconds (a third of the default lease)
pub const DEFAULT_RENEW_INTERVAL_MS: u64 = 20 * 1000;

// ============================================================================
// REASON STRINGS
// ============================================================================

/// Store command exceeded its deadline
pub const COMMAND_TIMED_OUT: &str = "Command timed out";

/// Handle carries an empty key or token
pub const LOCK_FIELD_EMPTY: &str = "lockKey or lockVal is empty";

/// Key is held by another token
pub const LOCK_EXIST: &str = "lock already exists";

/// Handle has already been stopped
pub const LOCK_STOP: &str = "lock is stop";

/// Stored value differs from the token, or the key is gone
pub const LOCK_NOT_EXIST: &str = "lockVal not match or lock not exist";

/// Renewal loop observed a stopped handle
pub const RENEW_STOP: &str = "stop";

/// Renewal loop was cancelled from outside
pub const RENEW_CANCELLED: &str = "renewal cancelled";
