//! Error types shared by the library and its two command-line front ends.

use std::path::PathBuf;

/// Everything that can go wrong while loading a graph, enumerating cliques,
/// or percolating communities.
///
/// Every variant here is operator-visible: the CLI binaries print the
/// `Display` form to stderr and exit with status 1. Programmer errors
/// (broken invariants inside the engine) are `assert!`/`debug_assert!`
/// instead — they are never recoverable and so never appear in this enum.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A CLI argument or config value failed validation (e.g. `k_min < 3`,
    /// a missing input file, or a non-numeric node token when integer ids
    /// were requested).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An edge-list line had fewer than two whitespace/tab/comma/pipe
    /// separated tokens.
    #[error("line {line_number} is badly formatted (need at least two fields): {line:?}")]
    BadlyFormattedLine {
        /// 1-indexed line number within the edge-list file.
        line_number: usize,
        /// The raw line content, for operator diagnosis.
        line: String,
    },

    /// An edge endpoint referred to a node twice (`u == v`). Self-loops are
    /// rejected at load time; the core never sees them.
    #[error("self-loop rejected at line {line_number}: node {node_name:?}")]
    SelfLoopRejected {
        /// 1-indexed line number within the edge-list file.
        line_number: usize,
        /// The offending node's original token.
        node_name: String,
    },

    /// No maximal clique in the graph reached the requested `k_min`.
    #[error("no cliques of size >= {k_min} were found")]
    NoCliquesAboveThreshold {
        /// The minimum clique size that was requested.
        k_min: usize,
    },

    /// More cliques were enumerated than fit in a 32-bit signed clique id.
    #[error("too many cliques ({count}): exceeds the 32-bit clique-id range")]
    TooManyCliques {
        /// The number of cliques that were enumerated.
        count: usize,
    },

    /// The edge-list path could not be opened.
    #[error("could not read edge list at {path}: {source}")]
    ReadEdgeList {
        /// The path that failed to open.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Any other filesystem failure (creating the output directory, writing
    /// a community file).
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
