// ============================================================================
// File: fakevisor/src/registry/queries.rs
// ----------------------------------------------------------------------------
// Registry query operations:
// - List registered backends
// - Aggregate verify diagnostics
// - Aggregate node info
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::SystemTime;

use log::{debug, warn};

use crate::backends::{BackendResult, HypervisorBackend, NodeInfo};

use super::BackendRegistry;

impl BackendRegistry {
    /// Get all registered backend names, sorted
    pub fn list_backends(&self) -> BackendResult<Vec<String>> {
        let backends = self.read_backends()?;
        let mut names: Vec<String> = backends.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    /// Run `verify` on every backend
    ///
    /// Backends are verified outside the registry lock; the outcome is
    /// recorded for `last_problem`.
    ///
    /// # Returns
    /// Problems by backend name; healthy backends are omitted
    pub fn verify_all(&self) -> BackendResult<BTreeMap<String, String>> {
        let mut outcomes = Vec::new();
        for (name, backend) in self.snapshot()? {
            let problem = backend.verify();
            if let Some(problem) = &problem {
                warn!("Backend '{name}' failed verification: {problem}");
            }
            outcomes.push((name, problem));
        }

        let now = SystemTime::now();
        let mut backends = self.write_backends()?;
        let mut problems = BTreeMap::new();
        for (name, problem) in outcomes {
            if let Some(managed) = backends.get_mut(&name) {
                managed.last_problem = problem.clone();
                managed.last_verified = Some(now);
            }
            if let Some(problem) = problem {
                problems.insert(name, problem);
            }
        }
        Ok(problems)
    }

    /// Collect node info from every backend
    ///
    /// A failing backend does not prevent the others from reporting.
    pub fn node_info_all(&self) -> BackendResult<BTreeMap<String, BackendResult<NodeInfo>>> {
        let results = self
            .snapshot()?
            .into_iter()
            .map(|(name, backend)| {
                let info = backend.node_info();
                (name, info)
            })
            .collect::<BTreeMap<_, _>>();
        debug!("Collected node info from {} backend(s)", results.len());
        Ok(results)
    }

    /// Problem reported by the most recent `verify_all`
    ///
    /// # Returns
    /// `None` if the backend is unknown, was never verified, or was healthy
    pub fn last_problem(&self, name: &str) -> BackendResult<Option<String>> {
        let backends = self.read_backends()?;
        Ok(backends
            .get(name)
            .and_then(|managed| managed.last_problem.clone()))
    }

    /// When a backend was registered and last verified
    pub fn timestamps(
        &self,
        name: &str,
    ) -> BackendResult<Option<(SystemTime, Option<SystemTime>)>> {
        let backends = self.read_backends()?;
        Ok(backends
            .get(name)
            .map(|managed| (managed.registered_at, managed.last_verified)))
    }

    fn snapshot(&self) -> BackendResult<Vec<(String, Arc<dyn HypervisorBackend>)>> {
        let backends = self.read_backends()?;
        Ok(backends
            .iter()
            .map(|(name, managed)| (name.clone(), Arc::clone(&managed.backend)))
            .collect())
    }
}
