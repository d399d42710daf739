// ============================================================================
// File: fakevisor/src/host/meminfo.rs
// ----------------------------------------------------------------------------
// Memory counter table parsing (/proc/meminfo layout).
// ============================================================================

/// Memory figures extracted from the counter table, in MiB
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MemorySummary {
    /// `MemTotal`
    pub total: u64,

    /// `MemFree` + `Buffers` + `Cached`, each normalised before summing
    pub free: u64,

    /// `Active`, if present
    pub active: Option<u64>,
}

/// Convert a kB counter to MiB, rounding down
pub fn kib_to_mib(kib: u64) -> u64 {
    kib / 1024
}

/// Parse a `key: value kB` memory table
///
/// Only `MemTotal`, `MemFree`, `Buffers`, `Cached` and `Active` are
/// consumed; other lines are ignored. `MemTotal` is required.
///
/// # Returns
/// The summary, or a description of the first malformed entry
pub fn parse_memory_table(table: &str) -> Result<MemorySummary, String> {
    let mut total = None;
    let mut free = 0u64;
    let mut active = None;

    for line in table.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim();
        if !matches!(key, "MemTotal" | "MemFree" | "Buffers" | "Cached" | "Active") {
            continue;
        }

        let mib = parse_kib(key, value).map(kib_to_mib)?;
        match key {
            "MemTotal" => total = Some(mib),
            "Active" => active = Some(mib),
            _ => free = free.saturating_add(mib),
        }
    }

    let total = total.ok_or_else(|| "MemTotal entry missing".to_string())?;
    Ok(MemorySummary {
        total,
        free,
        active,
    })
}

fn parse_kib(key: &str, value: &str) -> Result<u64, String> {
    let raw = value
        .split_whitespace()
        .next()
        .ok_or_else(|| format!("{key} has no value"))?;
    raw.parse::<u64>()
        .map_err(|e| format!("{key} value '{raw}' is not a number: {e}"))
}
