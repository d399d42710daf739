// ============================================================================
// File: fakevisor/src/host/proc.rs
// ----------------------------------------------------------------------------
// Host counters read from the /proc tables.
// ============================================================================

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::HostCounters;

/// Default location of the memory counter table
pub const PROC_MEMINFO: &str = "/proc/meminfo";

/// Default location of the processor enumeration table
pub const PROC_CPUINFO: &str = "/proc/cpuinfo";

/// Counters read from the live `/proc` tables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcCounters {
    meminfo: PathBuf,
    cpuinfo: PathBuf,
}

impl ProcCounters {
    /// Read from `/proc/meminfo` and `/proc/cpuinfo`
    pub fn new() -> Self {
        Self::with_paths(PROC_MEMINFO, PROC_CPUINFO)
    }

    /// Read from alternative table locations
    pub fn with_paths<M: Into<PathBuf>, C: Into<PathBuf>>(meminfo: M, cpuinfo: C) -> Self {
        Self {
            meminfo: meminfo.into(),
            cpuinfo: cpuinfo.into(),
        }
    }
}

impl Default for ProcCounters {
    fn default() -> Self {
        Self::new()
    }
}

impl HostCounters for ProcCounters {
    fn memory_source(&self) -> &Path {
        &self.meminfo
    }

    fn cpu_source(&self) -> &Path {
        &self.cpuinfo
    }

    fn read_memory_table(&self) -> io::Result<String> {
        fs::read_to_string(&self.meminfo)
    }

    fn read_cpu_table(&self) -> io::Result<String> {
        fs::read_to_string(&self.cpuinfo)
    }
}
