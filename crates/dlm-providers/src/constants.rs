//! Provider-specific constants

/// Redis endpoint used when a store config omits its URI
pub const DEFAULT_REDIS_URI: &str = "redis://localhost:6379";

/// Default per-command deadline in milliseconds
pub const DEFAULT_COMMAND_TIMEOUT_MS: u64 = 5_000;

/// Client name that always resolves to the default store
pub const DEFAULT_CLIENT_NAME: &str = "default";
