// ============================================================================
// File: fakevisor/src/registry/global.rs
// ----------------------------------------------------------------------------
// Global backend registry singleton
// ============================================================================

use std::sync::OnceLock;

use super::BackendRegistry;

/// Global backend registry singleton
static GLOBAL_REGISTRY: OnceLock<BackendRegistry> = OnceLock::new();

/// Get the process-wide backend registry
///
/// # Returns
/// Reference to the global registry, created empty on first use
pub fn global_registry() -> &'static BackendRegistry {
    GLOBAL_REGISTRY.get_or_init(BackendRegistry::new)
}
