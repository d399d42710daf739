// ============================================================================
// File: fakevisor/src/registry/lifecycle.rs
// ----------------------------------------------------------------------------
// Backend registration lifecycle:
// - Registration of existing or freshly created backends
// - Lookup by name
// - Removal
// ============================================================================

use std::sync::Arc;

use log::{info, warn};

use crate::backends::{
    BackendConfig, BackendError, BackendResult, HypervisorBackend, create_backend,
};

use super::{BackendRegistry, ManagedBackend};

impl BackendRegistry {
    /// Register a backend under a name
    ///
    /// # Arguments
    /// * `name` - Registry key, usually the node name
    /// * `backend` - Backend serving that node
    ///
    /// # Returns
    /// `BackendConflict` if the name is taken
    pub fn register<N: Into<String>>(
        &self,
        name: N,
        backend: Arc<dyn HypervisorBackend>,
    ) -> BackendResult<()> {
        let name = name.into();
        let mut backends = self.write_backends()?;

        if backends.contains_key(&name) {
            return Err(BackendError::BackendConflict { name });
        }

        info!(
            "Registered {} backend under '{}'",
            backend.backend_type(),
            name
        );
        backends.insert(name, ManagedBackend::new(backend));
        Ok(())
    }

    /// Create a backend through the factory and register it
    ///
    /// The registry key is the configuration name.
    pub fn create_and_register(
        &self,
        kind: &str,
        config: BackendConfig,
    ) -> BackendResult<Arc<dyn HypervisorBackend>> {
        let name = config.name.clone();
        if self.read_backends()?.contains_key(&name) {
            return Err(BackendError::BackendConflict { name });
        }

        let backend: Arc<dyn HypervisorBackend> = Arc::from(create_backend(kind, config)?);
        self.register(name, Arc::clone(&backend))?;
        Ok(backend)
    }

    /// Get a registered backend by name
    pub fn get(&self, name: &str) -> BackendResult<Arc<dyn HypervisorBackend>> {
        let backends = self.read_backends()?;
        backends
            .get(name)
            .map(|managed| Arc::clone(&managed.backend))
            .ok_or_else(|| BackendError::BackendNotFound {
                name: name.to_string(),
            })
    }

    /// Remove a backend from the registry
    ///
    /// # Returns
    /// The removed backend, or `None` if nothing was registered under `name`
    pub fn remove(&self, name: &str) -> BackendResult<Option<Arc<dyn HypervisorBackend>>> {
        let removed = self.write_backends()?.remove(name);
        if removed.is_none() {
            warn!("Backend '{name}' is not registered, nothing to remove");
        }
        Ok(removed.map(|managed| managed.backend))
    }
}
