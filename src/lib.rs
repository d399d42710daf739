// ============================================================================
// File: fakevisor/src/lib.rs
// ----------------------------------------------------------------------------
// Pluggable hypervisor backend contract for node managers.
//
// Provides:
// - HypervisorBackend trait every virtualization backend implements
// - FakeBackend, a simulated hypervisor backed by one record file per instance
// - Injectable record stores and host counter providers for testing
// - A named backend registry for aggregating diagnostics across nodes
// ============================================================================

pub mod backends;
pub mod host;
pub mod registry;
pub mod store;

pub use backends::{
    BackendConfig, BackendError, BackendResult, FakeBackend, FakeConfig, HypervisorBackend,
    InstanceInfo, InstanceSpec, InstanceState, NodeInfo, available_backends, create_backend,
};
pub use host::{HostCounters, ProcCounters, StaticCounters};
pub use registry::{BackendRegistry, global_registry};
pub use store::{DirStore, MemoryStore, RecordStore};

/// Environment variable holding the default filter for `init_logging`
pub const LOG_ENV: &str = "FAKEVISOR_LOG";

/// Install an `env_logger` backend for the `log` facade
///
/// Reads its filter from `FAKEVISOR_LOG`, defaulting to `info`.
/// Repeated calls are harmless; only the first one installs the logger.
///
/// # Returns
/// true if this call installed the logger
pub fn init_logging() -> bool {
    env_logger::Builder::from_env(env_logger::Env::new().filter_or(LOG_ENV, "info"))
        .format_timestamp_millis()
        .try_init()
        .is_ok()
}
