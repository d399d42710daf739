// ============================================================================
// File: fakevisor/src/host/cpuinfo.rs
// ----------------------------------------------------------------------------
// Processor table parsing.
// ============================================================================

/// Count logical processor entries in a `/proc/cpuinfo` style table
///
/// A line counts when its key is exactly `processor` (surrounding
/// whitespace before the colon allowed) and its value is a decimal index.
pub fn count_processors(table: &str) -> u32 {
    let count = table
        .lines()
        .filter(|line| is_processor_line(line))
        .count();
    u32::try_from(count).unwrap_or(u32::MAX)
}

fn is_processor_line(line: &str) -> bool {
    let Some((key, value)) = line.split_once(':') else {
        return false;
    };
    let value = value.trim();
    key.trim_end() == "processor" && !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}
