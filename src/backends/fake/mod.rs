// ============================================================================
// File: fakevisor/src/backends/fake/mod.rs
// ----------------------------------------------------------------------------
// Fake backend module - a hypervisor that runs nothing.
//
// Instances exist only as records in a state directory, which lets node
// management logic be exercised without virtualization hardware:
// - config: settings derived from BackendConfig
// - record: instance record file format
// - backend: HypervisorBackend implementation
// ============================================================================

mod backend;
mod config;
mod record;

#[cfg(test)]
mod tests;

pub use backend::FakeBackend;
pub use config::{DEFAULT_CONSOLE_COMMAND, FakeConfig, STATE_DIR_NAME};
pub use record::{InstanceRecord, PLACEHOLDER_ID};
