//! Infrastructure layer constants
//!
//! Lock protocol defaults live in `dlm_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "dlm.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "dlm";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "DLM";

/// Separator between nested keys in environment variable names
pub const CONFIG_ENV_SEPARATOR: &str = "__";

/// Name of the store client used when none is selected
pub const DEFAULT_STORE_NAME: &str = "default";

/// Provider of the default store client
pub const DEFAULT_STORE_PROVIDER: &str = "memory";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the configured log filter
pub const LOG_ENV_FILTER: &str = "DLM_LOG";

/// File stem used for log files when the configured path has none
pub const DEFAULT_LOG_FILE_STEM: &str = "dlm";
