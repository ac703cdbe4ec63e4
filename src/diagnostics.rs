//! Progress and memory-usage diagnostics, logged through the `log`
//! facade rather than printed directly.
//!
//! Mirrors the stderr chatter the original tool emitted via its
//! `PP`/`PP2`/`PP3`/`HOWLONG` macros: a summary once the graph is
//! loaded, Bloom filter occupancy per k, and a community count once
//! each level finishes.

use std::time::Duration;

/// Log a one-line summary of a freshly loaded graph.
pub fn log_network_loaded(num_nodes: usize, num_edges: usize, max_degree: usize, elapsed: Duration) {
    log::info!(
        "network loaded: {num_nodes} nodes, {num_edges} edges, max degree {max_degree} ({:.2}s)",
        elapsed.as_secs_f64()
    );
}

/// Log a summary of how many cliques were discovered, by size.
pub fn log_clique_frequencies(frequencies: &[(usize, usize)]) {
    for &(size, count) in frequencies {
        log::info!("cliques of size {size}: {count}");
    }
}

/// Log the occupancy of a freshly (re)populated per-source-component
/// Bloom filter, once at initial build and again on every adaptive
/// mid-search rebuild.
pub fn log_bloom_occupancy(k: usize, occupied_bits: u64, total_bits: u64, elapsed: Duration) {
    log::debug!(
        "bloom filter populated for k={k}: {occupied_bits}/{total_bits} bits occupied ({:.2}s)",
        elapsed.as_secs_f64()
    );
}

/// Log how many communities were found at one level.
pub fn log_level_complete(k: usize, num_communities: usize, elapsed: Duration) {
    log::info!(
        "k={k}: {num_communities} communities found ({:.2}s)",
        elapsed.as_secs_f64()
    );
}

/// Best-effort read of this process's virtual memory size from
/// `/proc/self/status`. Returns `None` on any platform or environment
/// where that file is absent (e.g. non-Linux), rather than failing.
#[must_use]
pub fn memory_usage() -> Option<String> {
    let status = std::fs::read_to_string("/proc/self/status").ok()?;
    status
        .lines()
        .find(|line| line.starts_with("VmSize"))
        .map(str::to_owned)
}

/// Log the current memory usage at `debug!` level, if available.
pub fn log_memory_usage() {
    if let Some(line) = memory_usage() {
        log::debug!("{line}");
    }
}
