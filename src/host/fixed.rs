// ============================================================================
// File: fakevisor/src/host/fixed.rs
// ----------------------------------------------------------------------------
// Host counters served from fixed text.
// ============================================================================

use std::io;
use std::path::{Path, PathBuf};

use super::HostCounters;

/// Counters served from fixed text, for tests and dry runs
///
/// A table set to `None` behaves like an unreadable source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticCounters {
    memory_table: Option<String>,
    cpu_table: Option<String>,
    memory_source: PathBuf,
    cpu_source: PathBuf,
}

impl StaticCounters {
    /// Serve both tables
    pub fn new<M: Into<String>, C: Into<String>>(memory_table: M, cpu_table: C) -> Self {
        Self::from_parts(Some(memory_table.into()), Some(cpu_table.into()))
    }

    /// Serve only the memory table; reading the CPU table fails
    pub fn memory_only<M: Into<String>>(memory_table: M) -> Self {
        Self::from_parts(Some(memory_table.into()), None)
    }

    /// Serve only the CPU table; reading the memory table fails
    pub fn cpu_only<C: Into<String>>(cpu_table: C) -> Self {
        Self::from_parts(None, Some(cpu_table.into()))
    }

    fn from_parts(memory_table: Option<String>, cpu_table: Option<String>) -> Self {
        Self {
            memory_table,
            cpu_table,
            memory_source: PathBuf::from("static:meminfo"),
            cpu_source: PathBuf::from("static:cpuinfo"),
        }
    }

    fn serve(table: Option<&str>, source: &Path) -> io::Result<String> {
        table.map(str::to_string).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} is not available", source.display()),
            )
        })
    }
}

impl HostCounters for StaticCounters {
    fn memory_source(&self) -> &Path {
        &self.memory_source
    }

    fn cpu_source(&self) -> &Path {
        &self.cpu_source
    }

    fn read_memory_table(&self) -> io::Result<String> {
        Self::serve(self.memory_table.as_deref(), &self.memory_source)
    }

    fn read_cpu_table(&self) -> io::Result<String> {
        Self::serve(self.cpu_table.as_deref(), &self.cpu_source)
    }
}
