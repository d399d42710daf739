// ============================================================================
// File: fakevisor/src/store/memory.rs
// ----------------------------------------------------------------------------
// In-memory record store for tests.
// ============================================================================

use std::collections::BTreeMap;
use std::io;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use super::{RecordStore, invalid_key_error, invalid_key_reason};

/// In-memory record store
///
/// Behaves like a state directory that lives only as long as the value.
/// `detach` simulates the directory disappearing underneath a backend.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<BTreeMap<String, String>>,
    detached: AtomicBool,
}

impl MemoryStore {
    /// Create an empty, present store
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all records and mark the store as missing until `ensure` runs
    pub fn detach(&self) {
        if let Ok(mut records) = self.records.write() {
            records.clear();
        }
        self.detached.store(true, Ordering::SeqCst);
    }

    fn check_present(&self) -> io::Result<()> {
        if self.detached.load(Ordering::SeqCst) {
            Err(io::Error::new(
                io::ErrorKind::NotFound,
                "memory store is detached",
            ))
        } else {
            Ok(())
        }
    }

    fn poisoned<E: std::fmt::Display>(e: E) -> io::Error {
        io::Error::other(format!("memory store lock poisoned: {e}"))
    }
}

impl RecordStore for MemoryStore {
    fn location(&self) -> String {
        "memory".to_string()
    }

    fn ensure(&self) -> io::Result<()> {
        self.detached.store(false, Ordering::SeqCst);
        Ok(())
    }

    fn is_present(&self) -> bool {
        !self.detached.load(Ordering::SeqCst)
    }

    fn keys(&self) -> io::Result<Vec<String>> {
        self.check_present()?;
        let records = self.records.read().map_err(Self::poisoned)?;
        Ok(records.keys().cloned().collect())
    }

    fn contains(&self, key: &str) -> io::Result<bool> {
        self.check_present()?;
        if invalid_key_reason(key).is_some() {
            return Ok(false);
        }
        let records = self.records.read().map_err(Self::poisoned)?;
        Ok(records.contains_key(key))
    }

    fn read(&self, key: &str) -> io::Result<Option<String>> {
        self.check_present()?;
        let records = self.records.read().map_err(Self::poisoned)?;
        Ok(records.get(key).cloned())
    }

    fn write(&self, key: &str, contents: &str) -> io::Result<()> {
        self.check_present()?;
        if let Some(err) = invalid_key_error(key) {
            return Err(err);
        }
        let mut records = self.records.write().map_err(Self::poisoned)?;
        records.insert(key.to_string(), contents.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> io::Result<()> {
        self.check_present()?;
        let mut records = self.records.write().map_err(Self::poisoned)?;
        records.remove(key);
        Ok(())
    }
}
