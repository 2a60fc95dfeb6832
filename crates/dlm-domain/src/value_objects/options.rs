//! Lock Options Value Object
//!
//! Namespace and store client selection shared by every call of one
//! coordinator instance.

use crate::constants::{DEFAULT_LOCK_PREFIX, LOCK_KEY_SEPARATOR};
use serde::{Deserialize, Serialize};

/// Value Object: coordinator-wide lock options
///
/// Missing or empty fields fall back to the built-in defaults: the
/// `"lock"` prefix and the default store client.
///
/// ## Example
///
/// ```
/// use dlm_domain::value_objects::LockOptions;
///
/// let options = LockOptions::default().with_prefix("billing");
/// assert_eq!(options.lock_key("job-42"), "billing:job-42");
/// assert_eq!(options.client_name(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LockOptions {
    /// Named store client to use; `None` or empty selects the default client
    pub client_name: Option<String>,
    /// Namespace prepended to every logical lock name
    pub prefix: String,
}

impl Default for LockOptions {
    fn default() -> Self {
        Self {
            client_name: None,
            prefix: DEFAULT_LOCK_PREFIX.to_string(),
        }
    }
}

impl LockOptions {
    /// Set the namespace prefix
    pub fn with_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Select a named store client
    pub fn with_client_name<S: Into<String>>(mut self, client_name: S) -> Self {
        self.client_name = Some(client_name.into());
        self
    }

    /// Prefix in effect, falling back to the default when empty
    pub fn effective_prefix(&self) -> &str {
        if self.prefix.is_empty() {
            DEFAULT_LOCK_PREFIX
        } else {
            &self.prefix
        }
    }

    /// Client name in effect; empty names select the default client
    pub fn client_name(&self) -> Option<&str> {
        self.client_name.as_deref().filter(|name| !name.is_empty())
    }

    /// Build the namespaced store key for a logical lock name
    pub fn lock_key(&self, name: &str) -> String {
        format!("{}{}{}", self.effective_prefix(), LOCK_KEY_SEPARATOR, name)
    }
}
