// ============================================================================
// File: fakevisor/src/backends/types.rs
// ----------------------------------------------------------------------------
// Instance request, instance info and node info types
// ============================================================================

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Instance start request
///
/// Carries everything a backend needs to bring an instance up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceSpec {
    /// Instance name, unique per node
    pub name: String,

    /// Requested memory in MiB
    pub memory: u64,

    /// Requested virtual CPU count
    pub vcpus: u32,

    /// Block device paths to attach
    pub block_devices: Vec<String>,

    /// Backend-specific start options
    pub extra_config: HashMap<String, String>,
}

impl InstanceSpec {
    /// Create a new start request
    ///
    /// # Arguments
    /// * `name` - Instance name
    /// * `memory` - Memory in MiB
    /// * `vcpus` - Virtual CPU count
    pub fn new<N: Into<String>>(name: N, memory: u64, vcpus: u32) -> Self {
        Self {
            name: name.into(),
            memory,
            vcpus,
            block_devices: Vec::new(),
            extra_config: HashMap::new(),
        }
    }

    /// Attach a block device
    pub fn with_block_device<D: Into<String>>(mut self, device: D) -> Self {
        self.block_devices.push(device.into());
        self
    }

    /// Add backend-specific start option
    pub fn with_extra_config<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.extra_config.insert(key.into(), value.into());
        self
    }
}

/// Lifecycle state reported for an instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstanceState {
    Running,
    NotRunning,
}

impl fmt::Display for InstanceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstanceState::Running => f.write_str("running"),
            InstanceState::NotRunning => f.write_str("not running"),
        }
    }
}

/// Runtime information about one instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceInfo {
    /// Instance name
    pub name: String,

    /// Backend-assigned identifier
    pub id: String,

    /// Memory in MiB
    pub memory: u64,

    /// Virtual CPU count
    pub vcpus: u32,

    /// Current lifecycle state
    pub state: InstanceState,

    /// Consumed CPU time in seconds
    pub runtime: u64,
}

impl InstanceInfo {
    /// Check if the instance is running
    pub fn is_running(&self) -> bool {
        self.state == InstanceState::Running
    }
}

/// Snapshot of node resources
///
/// All memory figures are in MiB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NodeInfo {
    /// Total memory installed on the node
    pub memory_total: u64,

    /// Memory available for instances
    pub memory_free: u64,

    /// Memory used by the node itself, when the OS reports it
    pub memory_dom0: Option<u64>,

    /// Logical processor count
    pub cpu_total: u32,
}
