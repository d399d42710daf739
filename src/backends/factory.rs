// ============================================================================
// File: fakevisor/src/backends/factory.rs
// ----------------------------------------------------------------------------
// Backend factory functions
// ============================================================================

use crate::backends::config::BackendConfig;
use crate::backends::errors::{BackendError, BackendResult};
use crate::backends::fake::FakeBackend;
use crate::backends::trait_def::HypervisorBackend;

/// Create a backend instance from configuration
///
/// # Arguments
/// * `kind` - Backend type name, matched case-insensitively
/// * `config` - Backend configuration
///
/// # Returns
/// Boxed backend instance or error if backend is not available
pub fn create_backend(
    kind: &str,
    config: BackendConfig,
) -> BackendResult<Box<dyn HypervisorBackend>> {
    if !config.enabled {
        return Err(BackendError::NotAvailable {
            backend: kind.to_string(),
            reason: format!("backend '{}' is disabled in configuration", config.name),
        });
    }

    match kind.to_ascii_lowercase().as_str() {
        "fake" => {
            let backend = FakeBackend::new(config)?;
            Ok(Box::new(backend))
        }
        _ => Err(BackendError::NotAvailable {
            backend: kind.to_string(),
            reason: format!(
                "unknown backend type, expected one of: {}",
                available_backends().join(", ")
            ),
        }),
    }
}

/// Get all backend types this build can create
///
/// # Returns
/// List of backend type names
pub fn available_backends() -> Vec<&'static str> {
    vec!["Fake"]
}
