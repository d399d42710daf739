// ============================================================================
// File: fakevisor/src/registry/mod.rs
// ----------------------------------------------------------------------------
// Named registry of hypervisor backends, typically one per managed node.
//
// Provides:
// - Named backend registration and lookup
// - Thread-safe shared access through RwLock
// - Aggregated verify diagnostics and node info across backends
// ============================================================================

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::SystemTime;

use crate::backends::{BackendError, BackendResult, HypervisorBackend};

mod global;
mod lifecycle;
mod queries;


pub use global::global_registry;

/// Thread-safe registry of named backends
///
/// Backends are shared as `Arc<dyn HypervisorBackend>` so callers can keep
/// using a backend after it has been removed from the registry.
#[derive(Debug, Default)]
pub struct BackendRegistry {
    /// Registered backends by name
    pub(crate) backends: RwLock<HashMap<String, ManagedBackend>>,
}

/// Registered backend with bookkeeping
#[derive(Debug)]
pub(crate) struct ManagedBackend {
    /// The backend instance
    pub(crate) backend: Arc<dyn HypervisorBackend>,

    /// Registration timestamp
    pub(crate) registered_at: SystemTime,

    /// Problem reported by the last verify, `None` if healthy
    pub(crate) last_problem: Option<String>,

    /// Timestamp of the last verify
    pub(crate) last_verified: Option<SystemTime>,
}

impl ManagedBackend {
    pub(crate) fn new(backend: Arc<dyn HypervisorBackend>) -> Self {
        Self {
            backend,
            registered_at: SystemTime::now(),
            last_problem: None,
            last_verified: None,
        }
    }
}

impl BackendRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn read_backends(
        &self,
    ) -> BackendResult<RwLockReadGuard<'_, HashMap<String, ManagedBackend>>> {
        self.backends.read().map_err(|e| BackendError::Internal {
            message: format!("Failed to acquire read lock: {e}"),
        })
    }

    pub(crate) fn write_backends(
        &self,
    ) -> BackendResult<RwLockWriteGuard<'_, HashMap<String, ManagedBackend>>> {
        self.backends.write().map_err(|e| BackendError::Internal {
            message: format!("Failed to acquire write lock: {e}"),
        })
    }
}
