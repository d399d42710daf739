// ============================================================================
// File: fakevisor/src/host/mod.rs
// ----------------------------------------------------------------------------
// Host resource counters for node info snapshots.
//
// Provides:
// - HostCounters trait over the OS memory and CPU tables
// - ProcCounters reading /proc, StaticCounters serving fixed text
// - Pure parsers for the `key: value` tables and MiB normalisation
// ============================================================================

use std::fmt;
use std::io;
use std::path::Path;

use crate::backends::{BackendError, BackendResult, NodeInfo};

mod cpuinfo;
mod fixed;
mod meminfo;
mod proc;

pub use cpuinfo::count_processors;
pub use fixed::StaticCounters;
pub use meminfo::{MemorySummary, kib_to_mib, parse_memory_table};
pub use proc::{PROC_CPUINFO, PROC_MEMINFO, ProcCounters};

/// Source of the raw OS counter tables
pub trait HostCounters: Send + Sync + fmt::Debug {
    /// Where the memory table comes from, for diagnostics
    fn memory_source(&self) -> &Path;

    /// Where the CPU table comes from, for diagnostics
    fn cpu_source(&self) -> &Path;

    /// Raw `key: value` memory counter table
    fn read_memory_table(&self) -> io::Result<String>;

    /// Raw `key: value` processor enumeration table
    fn read_cpu_table(&self) -> io::Result<String>;
}

/// Build a node info snapshot from live counters
///
/// Both tables are read on every call. A failure reading or parsing either
/// one fails the whole snapshot.
pub fn collect_node_info(counters: &dyn HostCounters) -> BackendResult<NodeInfo> {
    let memory_table = counters
        .read_memory_table()
        .map_err(|e| BackendError::host_counters(counters.memory_source(), e.to_string()))?;
    let memory = parse_memory_table(&memory_table)
        .map_err(|details| BackendError::host_counters(counters.memory_source(), details))?;

    let cpu_table = counters
        .read_cpu_table()
        .map_err(|e| BackendError::host_counters(counters.cpu_source(), e.to_string()))?;

    Ok(NodeInfo {
        memory_total: memory.total,
        memory_free: memory.free,
        memory_dom0: memory.active,
        cpu_total: count_processors(&cpu_table),
    })
}
