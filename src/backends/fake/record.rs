// ============================================================================
// File: fakevisor/src/backends/fake/record.rs
// ----------------------------------------------------------------------------
// On-disk instance record format for the fake backend.
//
// One record per instance, newline separated:
//   line 1: instance id (always "0")
//   line 2: memory in MiB
//   line 3: vcpu count
// ============================================================================

use crate::backends::{InstanceInfo, InstanceSpec, InstanceState};

/// Identifier reported for every fake instance
pub const PLACEHOLDER_ID: &str = "0";

/// Persisted part of a running fake instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceRecord {
    pub id: String,
    pub memory: u64,
    pub vcpus: u32,
}

impl InstanceRecord {
    /// Record written when `spec` is started
    pub fn from_spec(spec: &InstanceSpec) -> Self {
        Self {
            id: PLACEHOLDER_ID.to_string(),
            memory: spec.memory,
            vcpus: spec.vcpus,
        }
    }

    /// Serialize to the record file layout
    pub fn encode(&self) -> String {
        format!("{}\n{}\n{}\n", self.id, self.memory, self.vcpus)
    }

    /// Parse a record file
    ///
    /// Surrounding whitespace on each line is ignored, as is anything after
    /// the third line.
    pub fn decode(text: &str) -> Result<Self, String> {
        let mut lines = text.lines().map(str::trim);

        let id = lines.next().ok_or("record is empty")?.to_string();
        let memory = lines.next().ok_or("memory line missing")?;
        let vcpus = lines.next().ok_or("vcpus line missing")?;

        Ok(Self {
            id,
            memory: memory
                .parse()
                .map_err(|e| format!("memory '{memory}' is not a number: {e}"))?,
            vcpus: vcpus
                .parse()
                .map_err(|e| format!("vcpus '{vcpus}' is not a number: {e}"))?,
        })
    }

    /// Report the record as a running instance
    pub fn into_info(self, name: &str) -> InstanceInfo {
        InstanceInfo {
            name: name.to_string(),
            id: self.id,
            memory: self.memory,
            vcpus: self.vcpus,
            state: InstanceState::Running,
            runtime: 0,
        }
    }
}
