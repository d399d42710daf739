// ============================================================================
// File: fakevisor/src/backends/fake/backend.rs
// ----------------------------------------------------------------------------
// Fake backend implementation of HypervisorBackend trait.
// ============================================================================

use std::sync::Arc;

use log::{debug, info};

use crate::backends::{
    BackendConfig, BackendError, BackendResult, HypervisorBackend, InstanceInfo, InstanceSpec,
    NodeInfo,
};
use crate::host::{self, HostCounters, ProcCounters};
use crate::store::{self, DirStore, RecordStore};

use super::config::FakeConfig;
use super::record::InstanceRecord;

/// Simulated hypervisor
///
/// Every running instance is one record in the state store; nothing is
/// cached between calls. Start and stop check for the record and then act
/// on it as two separate steps, so concurrent callers racing on the same
/// name are not serialised.
#[derive(Debug, Clone)]
pub struct FakeBackend {
    /// Backend configuration
    config: BackendConfig,

    /// Fake backend runtime configuration
    fake_config: FakeConfig,

    /// Instance records
    store: Arc<dyn RecordStore>,

    /// Node resource counters
    counters: Arc<dyn HostCounters>,
}

impl FakeBackend {
    /// Create a fake backend keeping its records in the configured state
    /// directory and reading host counters from the configured tables
    ///
    /// The state directory is created if it does not exist.
    pub fn new(config: BackendConfig) -> BackendResult<Self> {
        let fake_config = FakeConfig::from_backend_config(&config)?;
        let store = Arc::new(DirStore::new(&fake_config.state_dir));
        let counters = Arc::new(ProcCounters::with_paths(
            &fake_config.meminfo_path,
            &fake_config.cpuinfo_path,
        ));
        Self::assemble(config, fake_config, store, counters)
    }

    /// Create a fake backend over explicit storage and counter providers
    ///
    /// Only `console_command` is taken from the backend-specific settings.
    /// `state_dir`, `meminfo_path` and `cpuinfo_path` are still validated but
    /// describe nothing here: records live wherever `store` keeps them and
    /// counters come from `counters`.
    pub fn with_parts(
        config: BackendConfig,
        store: Arc<dyn RecordStore>,
        counters: Arc<dyn HostCounters>,
    ) -> BackendResult<Self> {
        let fake_config = FakeConfig::from_backend_config(&config)?;
        Self::assemble(config, fake_config, store, counters)
    }

    fn assemble(
        config: BackendConfig,
        fake_config: FakeConfig,
        store: Arc<dyn RecordStore>,
        counters: Arc<dyn HostCounters>,
    ) -> BackendResult<Self> {
        store.ensure().map_err(|e| BackendError::NotAvailable {
            backend: "Fake".to_string(),
            reason: format!("cannot create state store {}: {e}", store.location()),
        })?;

        Ok(Self {
            config,
            fake_config,
            store,
            counters,
        })
    }

    /// Fake backend runtime configuration
    pub fn fake_config(&self) -> &FakeConfig {
        &self.fake_config
    }

    fn running(&self, name: &str) -> BackendResult<bool> {
        self.store
            .contains(name)
            .map_err(|e| BackendError::instance_io(name, &e))
    }

    fn load(&self, name: &str) -> BackendResult<Option<InstanceInfo>> {
        let Some(contents) = self
            .store
            .read(name)
            .map_err(|e| BackendError::instance_io(name, &e))?
        else {
            return Ok(None);
        };

        let record =
            InstanceRecord::decode(&contents).map_err(|details| BackendError::CorruptRecord {
                name: name.to_string(),
                details,
            })?;
        Ok(Some(record.into_info(name)))
    }
}

impl HypervisorBackend for FakeBackend {
    fn list_instances(&self) -> BackendResult<Vec<String>> {
        let names = self
            .store
            .keys()
            .map_err(|e| BackendError::listing(&self.store.location(), &e))?;
        debug!("Fake backend lists {} instance(s)", names.len());
        Ok(names)
    }

    fn instance_info(&self, name: &str) -> BackendResult<Option<InstanceInfo>> {
        self.load(name)
    }

    fn all_instances_info(&self) -> BackendResult<Vec<InstanceInfo>> {
        let mut infos = Vec::new();
        for name in self.list_instances()? {
            match self.load(&name)? {
                Some(info) => infos.push(info),
                None => debug!("Instance {name} stopped while listing, skipping"),
            }
        }
        Ok(infos)
    }

    fn start_instance(&self, spec: &InstanceSpec) -> BackendResult<()> {
        if let Some(reason) = store::invalid_key_reason(&spec.name) {
            return Err(BackendError::InvalidName {
                name: spec.name.clone(),
                reason,
            });
        }

        if self.running(&spec.name)? {
            return Err(BackendError::AlreadyRunning {
                name: spec.name.clone(),
            });
        }

        if !spec.block_devices.is_empty() || !spec.extra_config.is_empty() {
            debug!(
                "Ignoring {} block device(s) and {} extra option(s) for {}",
                spec.block_devices.len(),
                spec.extra_config.len(),
                spec.name
            );
        }

        let record = InstanceRecord::from_spec(spec);
        self.store
            .write(&spec.name, &record.encode())
            .map_err(|e| BackendError::instance_io(&spec.name, &e))?;

        info!(
            "Started fake instance {} ({} MiB, {} vCPU)",
            spec.name, spec.memory, spec.vcpus
        );
        Ok(())
    }

    fn stop_instance(&self, name: &str, force: bool) -> BackendResult<()> {
        if !self.running(name)? {
            return Err(BackendError::NotRunning {
                name: name.to_string(),
            });
        }

        self.store
            .remove(name)
            .map_err(|e| BackendError::instance_io(name, &e))?;

        info!("Stopped fake instance {name} (force={force})");
        Ok(())
    }

    fn reboot_instance(&self, name: &str) -> BackendResult<()> {
        debug!("Reboot of fake instance {name} is a no-op");
        Ok(())
    }

    fn node_info(&self) -> BackendResult<NodeInfo> {
        let info = host::collect_node_info(self.counters.as_ref())?;
        debug!(
            "Node info: {} MiB total, {} MiB free, {} CPU(s)",
            info.memory_total, info.memory_free, info.cpu_total
        );
        Ok(info)
    }

    fn console_command(&self, _name: &str) -> String {
        self.fake_config.console_command.clone()
    }

    fn verify(&self) -> Option<String> {
        if self.store.is_present() {
            return None;
        }
        Some(
            BackendError::ConfigurationMissing {
                path: self.store.location(),
            }
            .to_string(),
        )
    }

    fn get_config(&self) -> &BackendConfig {
        &self.config
    }

    fn backend_type(&self) -> &'static str {
        "Fake"
    }
}
