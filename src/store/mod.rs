// ============================================================================
// File: fakevisor/src/store/mod.rs
// ----------------------------------------------------------------------------
// Key/value storage for instance records.
//
// Backends keep their durable state behind RecordStore so lifecycle logic
// can run against a real directory or an in-memory map:
// - DirStore: one file per key inside a state directory
// - MemoryStore: process-local map for unit tests
// ============================================================================

use std::fmt;
use std::io;

mod dir;
mod memory;

pub use dir::DirStore;
pub use memory::MemoryStore;

/// Durable storage of named records
///
/// Implementations hold no cache between calls; every method observes the
/// current contents of the underlying storage.
pub trait RecordStore: Send + Sync + fmt::Debug {
    /// Human-readable location of the store, used in diagnostics
    fn location(&self) -> String;

    /// Create the underlying storage if it does not exist yet
    fn ensure(&self) -> io::Result<()>;

    /// Check whether the underlying storage exists
    fn is_present(&self) -> bool;

    /// List all record keys in ascending order
    fn keys(&self) -> io::Result<Vec<String>>;

    /// Check whether a record exists
    fn contains(&self, key: &str) -> io::Result<bool>;

    /// Read a record, `None` if it does not exist
    fn read(&self, key: &str) -> io::Result<Option<String>>;

    /// Create or replace a record
    fn write(&self, key: &str, contents: &str) -> io::Result<()>;

    /// Delete a record; deleting a missing record succeeds
    fn remove(&self, key: &str) -> io::Result<()>;
}

/// Check that a key can be used as a single path component
///
/// # Returns
/// The reason the key is rejected, if it is
pub fn invalid_key_reason(key: &str) -> Option<&'static str> {
    if key.is_empty() {
        Some("name is empty")
    } else if key == "." || key == ".." {
        Some("name is a relative path component")
    } else if key.contains('/') {
        Some("name contains '/'")
    } else if key.contains('\0') {
        Some("name contains a NUL byte")
    } else {
        None
    }
}

pub(crate) fn invalid_key_error(key: &str) -> Option<io::Error> {
    invalid_key_reason(key).map(|reason| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("invalid record key '{key}': {reason}"),
        )
    })
}
