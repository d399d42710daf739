// ============================================================================
// File: fakevisor/src/backends/trait_def.rs
// ----------------------------------------------------------------------------
// HypervisorBackend trait definition
// ============================================================================

use crate::backends::config::BackendConfig;
use crate::backends::errors::BackendResult;
use crate::backends::types::{InstanceInfo, InstanceSpec, NodeInfo};

/// Core hypervisor backend trait
///
/// All backends must implement this trait so the node manager can drive
/// real and simulated hypervisors interchangeably. Every operation is
/// synchronous and completes without suspension points.
pub trait HypervisorBackend: Send + Sync + std::fmt::Debug {
    /// List the names of all running instances
    fn list_instances(&self) -> BackendResult<Vec<String>>;

    /// Get information about one instance
    ///
    /// # Arguments
    /// * `name` - Instance name
    ///
    /// # Returns
    /// `None` if the instance is not running; an error only when the
    /// instance exists but cannot be read
    fn instance_info(&self, name: &str) -> BackendResult<Option<InstanceInfo>>;

    /// Get information about every running instance
    ///
    /// Fails as a whole if any single instance cannot be read.
    fn all_instances_info(&self) -> BackendResult<Vec<InstanceInfo>>;

    /// Start an instance
    ///
    /// # Arguments
    /// * `spec` - Name, resources and backend-specific options
    fn start_instance(&self, spec: &InstanceSpec) -> BackendResult<()>;

    /// Stop an instance
    ///
    /// # Arguments
    /// * `name` - Instance name
    /// * `force` - Skip graceful shutdown where the backend supports it
    fn stop_instance(&self, name: &str, force: bool) -> BackendResult<()>;

    /// Reboot an instance
    fn reboot_instance(&self, name: &str) -> BackendResult<()>;

    /// Collect a fresh snapshot of node resources
    fn node_info(&self) -> BackendResult<NodeInfo>;

    /// Shell command that connects to the console of an instance
    fn console_command(&self, name: &str) -> String;

    /// Check operational readiness
    ///
    /// # Returns
    /// `None` when healthy, otherwise a human-readable description of the
    /// problem suitable for aggregating across nodes
    fn verify(&self) -> Option<String>;

    /// Get backend-specific configuration
    fn get_config(&self) -> &BackendConfig;

    /// Get the backend type identifier
    fn backend_type(&self) -> &'static str;
}
