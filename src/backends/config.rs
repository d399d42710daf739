// ============================================================================
// File: fakevisor/src/backends/config.rs
// ----------------------------------------------------------------------------
// Configuration types for hypervisor backends
// ============================================================================

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Environment variable overriding the runtime directory
pub const RUN_DIR_ENV: &str = "FAKEVISOR_RUN_DIR";

/// Runtime directory used when nothing else is configured
pub const DEFAULT_RUN_DIR: &str = "/var/run";

/// Backend configuration
///
/// Common configuration options for all backends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Backend name/identifier
    pub name: String,

    /// Whether this backend is enabled
    pub enabled: bool,

    /// Process-wide runtime directory; backends keep their state below it
    pub run_dir: PathBuf,

    /// Backend-specific configuration
    pub backend_specific: HashMap<String, String>,
}

impl BackendConfig {
    /// Create a new backend configuration
    pub fn new<N: Into<String>>(name: N) -> Self {
        Self {
            name: name.into(),
            enabled: true,
            run_dir: PathBuf::from(DEFAULT_RUN_DIR),
            backend_specific: HashMap::new(),
        }
    }

    /// Create a configuration whose runtime directory honours `FAKEVISOR_RUN_DIR`
    pub fn from_env<N: Into<String>>(name: N) -> Self {
        let config = Self::new(name);
        match std::env::var_os(RUN_DIR_ENV) {
            Some(dir) if !dir.is_empty() => config.with_run_dir(dir),
            _ => config,
        }
    }

    /// Set enabled status
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set runtime directory
    pub fn with_run_dir<P: Into<PathBuf>>(mut self, run_dir: P) -> Self {
        self.run_dir = run_dir.into();
        self
    }

    /// Add backend-specific configuration
    pub fn with_config<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.backend_specific.insert(key.into(), value.into());
        self
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self::new("default")
    }
}
