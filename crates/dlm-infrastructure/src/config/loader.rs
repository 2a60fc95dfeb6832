//! Configuration loader
//!
//! Loads configuration from default values, a TOML file and environment
//! variables, using Figment.

use crate::config::AppConfig;
use crate::constants::{
    CONFIG_ENV_PREFIX, CONFIG_ENV_SEPARATOR, DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_FILENAME,
    DEFAULT_STORE_NAME,
};
use crate::error_ext::ErrorContext;
use crate::logging::log_config_loaded;
use dlm_domain::error::{Error, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use std::env;
use std::path::{Path, PathBuf};

/// Configuration loader service
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: String,
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load configuration from all sources
    ///
    /// Configuration sources are merged in this order (later sources override earlier):
    /// 1. Default values from `AppConfig::default()`
    /// 2. TOML configuration file (if exists)
    /// 3. Environment variables with prefix (e.g., `DLM__LOCK__PREFIX`)
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        if let Some(config_path) = &self.config_path {
            if config_path.exists() {
                figment = figment.merge(Toml::file(config_path));
                log_config_loaded(config_path, true);
            } else {
                log_config_loaded(config_path, false);
            }
        } else if let Some(default_path) = Self::find_default_config_path() {
            figment = figment.merge(Toml::file(&default_path));
            log_config_loaded(&default_path, true);
        }

        // Double underscore separates nested keys (e.g., DLM__STORES__DEFAULT__URI)
        figment = figment.merge(
            Env::prefixed(&format!("{}{}", self.env_prefix, CONFIG_ENV_SEPARATOR))
                .split(CONFIG_ENV_SEPARATOR),
        );

        let app_config: AppConfig = figment
            .extract()
            .config_context("Failed to extract configuration")?;

        validate_app_config(&app_config)?;

        Ok(app_config)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, config: &AppConfig, path: P) -> Result<()> {
        let toml_string =
            toml::to_string_pretty(config).context("Failed to serialize config to TOML")?;

        std::fs::write(path.as_ref(), toml_string).io_context("Failed to write config file")?;

        Ok(())
    }

    /// Get the current configuration file path
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Find the first existing default configuration file
    fn find_default_config_path() -> Option<PathBuf> {
        let current_dir = env::current_dir().ok()?;

        let candidates = [
            Some(current_dir.join(DEFAULT_CONFIG_FILENAME)),
            Some(
                current_dir
                    .join(DEFAULT_CONFIG_DIR)
                    .join(DEFAULT_CONFIG_FILENAME),
            ),
            dirs::config_dir().map(|d| d.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME)),
        ];

        candidates.into_iter().flatten().find(|path| path.exists())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate application configuration
pub fn validate_app_config(config: &AppConfig) -> Result<()> {
    validate_lock_config(config)?;
    validate_store_config(config)?;
    Ok(())
}

fn validate_lock_config(config: &AppConfig) -> Result<()> {
    let lock = &config.lock;
    if lock.default_expire_ms == 0 {
        return Err(Error::config("Lock expire time cannot be 0"));
    }
    if lock.retry_interval_ms == 0 {
        return Err(Error::config("Lock retry interval cannot be 0"));
    }
    if lock.renew_interval_ms == 0 {
        return Err(Error::config("Lock renew interval cannot be 0"));
    }
    if lock.renew_interval_ms >= lock.default_expire_ms {
        return Err(Error::config(format!(
            "Lock renew interval ({}ms) must be shorter than the expire time ({}ms)",
            lock.renew_interval_ms, lock.default_expire_ms
        )));
    }
    Ok(())
}

fn validate_store_config(config: &AppConfig) -> Result<()> {
    if config.stores.is_empty() {
        return Err(Error::config("At least one store must be configured"));
    }
    if config.default_store().is_none() {
        return Err(Error::config(format!(
            "A store named '{}' is required",
            DEFAULT_STORE_NAME
        )));
    }
    if let Some((name, _)) = config
        .stores
        .iter()
        .find(|(_, store)| store.provider.trim().is_empty())
    {
        return Err(Error::config(format!(
            "Store '{}' has an empty provider name",
            name
        )));
    }
    if let Some(client_name) = config.lock.client_name.as_deref()
        && !client_name.is_empty()
        && !config.stores.contains_key(client_name)
    {
        return Err(Error::config(format!(
            "Lock client '{}' does not match any configured store",
            client_name
        )));
    }
    Ok(())
}
