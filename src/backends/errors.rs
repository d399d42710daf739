// ============================================================================
// File: fakevisor/src/backends/errors.rs
// ----------------------------------------------------------------------------
// Backend-specific error types
// ============================================================================

use std::io;
use std::path::Path;

/// Backend-specific error types
///
/// Covers errors that can occur during backend operations. Every variant
/// carries the offending instance name, path or counter source along with
/// the underlying cause rendered as text, so the error stays `Clone`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    /// Start requested for an instance that already has a record
    #[error("Failed to start instance {name}: already running")]
    AlreadyRunning { name: String },

    /// Stop requested for an instance without a record
    #[error("Failed to stop instance {name}: not running")]
    NotRunning { name: String },

    /// Instance record could not be read, written or removed
    #[error("I/O failure on instance {name}: {details}")]
    InstanceIo { name: String, details: String },

    /// Instance record exists but its contents cannot be interpreted
    #[error("Corrupt record for instance {name}: {details}")]
    CorruptRecord { name: String, details: String },

    /// State directory could not be enumerated
    #[error("Failed to list instances in {path}: {details}")]
    ListingFailed { path: String, details: String },

    /// Host resource counters could not be read or parsed
    #[error("Failed to read node info from {source_name}: {details}")]
    HostCounters { source_name: String, details: String },

    /// Required state directory is absent
    #[error("The required directory '{path}' does not exist.")]
    ConfigurationMissing { path: String },

    /// Instance name cannot be used as a record key
    #[error("Invalid instance name '{name}': {reason}")]
    InvalidName { name: String, reason: &'static str },

    /// Backend is not available on this platform or under this name
    #[error("Backend {backend} is not available: {reason}")]
    NotAvailable { backend: String, reason: String },

    /// Backend configuration is invalid
    #[error("Invalid configuration for {backend}: {details}")]
    InvalidConfig {
        backend: &'static str,
        details: String,
    },

    /// A backend is already registered under this name
    #[error("Backend '{name}' is already registered")]
    BackendConflict { name: String },

    /// No backend registered under this name
    #[error("Backend '{name}' is not registered")]
    BackendNotFound { name: String },

    /// Internal error
    #[error("Internal backend error: {message}")]
    Internal { message: String },
}

impl BackendError {
    pub(crate) fn instance_io(name: &str, err: &io::Error) -> Self {
        Self::InstanceIo {
            name: name.to_string(),
            details: err.to_string(),
        }
    }

    pub(crate) fn listing(path: &str, err: &io::Error) -> Self {
        Self::ListingFailed {
            path: path.to_string(),
            details: err.to_string(),
        }
    }

    pub(crate) fn host_counters<D: Into<String>>(source: &Path, details: D) -> Self {
        Self::HostCounters {
            source_name: source.display().to_string(),
            details: details.into(),
        }
    }

    /// Name of the instance this error concerns, if any
    pub fn instance_name(&self) -> Option<&str> {
        match self {
            Self::AlreadyRunning { name }
            | Self::NotRunning { name }
            | Self::InstanceIo { name, .. }
            | Self::CorruptRecord { name, .. }
            | Self::InvalidName { name, .. } => Some(name),
            _ => None,
        }
    }
}

/// Result type for backend operations
pub type BackendResult<T> = Result<T, BackendError>;
