// ============================================================================
// File: fakevisor/src/backends/fake/config.rs
// ----------------------------------------------------------------------------
// Fake backend configuration derived from the common backend config.
// ============================================================================

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::backends::{BackendConfig, BackendError, BackendResult};
use crate::host::{PROC_CPUINFO, PROC_MEMINFO};

/// Directory below the runtime directory holding instance records
pub const STATE_DIR_NAME: &str = "fakevisor-hypervisor";

/// Console command returned for every instance
pub const DEFAULT_CONSOLE_COMMAND: &str = "echo Console not available for fake hypervisor";

/// Fake backend specific configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FakeConfig {
    /// Directory holding one record per running instance
    pub state_dir: PathBuf,

    /// Command returned by `console_command`
    pub console_command: String,

    /// Memory counter table
    pub meminfo_path: PathBuf,

    /// Processor enumeration table
    pub cpuinfo_path: PathBuf,
}

impl FakeConfig {
    /// Derive the fake backend settings from a backend config
    ///
    /// Recognised `backend_specific` keys: `state_dir`, `console_command`,
    /// `meminfo_path`, `cpuinfo_path`.
    pub fn from_backend_config(config: &BackendConfig) -> BackendResult<Self> {
        let mut fake_config = FakeConfig {
            state_dir: config.run_dir.join(STATE_DIR_NAME),
            console_command: DEFAULT_CONSOLE_COMMAND.to_string(),
            meminfo_path: PathBuf::from(PROC_MEMINFO),
            cpuinfo_path: PathBuf::from(PROC_CPUINFO),
        };

        if let Some(state_dir) = config.backend_specific.get("state_dir") {
            fake_config.state_dir = PathBuf::from(state_dir);
        }

        if let Some(command) = config.backend_specific.get("console_command") {
            if command.trim().is_empty() {
                return Err(BackendError::InvalidConfig {
                    backend: "Fake",
                    details: "console_command must not be empty".to_string(),
                });
            }
            fake_config.console_command = command.clone();
        }

        if let Some(path) = config.backend_specific.get("meminfo_path") {
            fake_config.meminfo_path = PathBuf::from(path);
        }

        if let Some(path) = config.backend_specific.get("cpuinfo_path") {
            fake_config.cpuinfo_path = PathBuf::from(path);
        }

        if fake_config.state_dir.as_os_str().is_empty() {
            return Err(BackendError::InvalidConfig {
                backend: "Fake",
                details: "state directory path is empty".to_string(),
            });
        }

        Ok(fake_config)
    }
}
