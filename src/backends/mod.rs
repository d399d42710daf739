// ============================================================================
// File: fakevisor/src/backends/mod.rs
// ----------------------------------------------------------------------------
// Backend trait definitions and module organization for hypervisor backends.
//
// Provides a unified interface for virtualization backends:
// - HypervisorBackend trait for instance lifecycle and node queries
// - Backend-specific error types and configurations
// - Factory for constructing backends by kind name
// ============================================================================

mod config;
mod errors;
mod factory;
mod trait_def;
mod types;

pub mod fake;

pub use config::{BackendConfig, DEFAULT_RUN_DIR, RUN_DIR_ENV};
pub use errors::{BackendError, BackendResult};
pub use factory::{available_backends, create_backend};
pub use trait_def::HypervisorBackend;
pub use types::{InstanceInfo, InstanceSpec, InstanceState, NodeInfo};

pub use fake::{FakeBackend, FakeConfig};
