//! k-clique community detection via the Clique Percolation Method (CPM).
//!
//! The pipeline is: an edge-list file is loaded into an immutable
//! [`graph::Graph`] (via [`loader`]), every maximal clique of size at
//! least `k_min` is enumerated into a [`cliques::CliqueSet`], and
//! [`percolation::run`] groups those cliques into communities for every
//! k in `k_min..=k_max`, reusing each level's communities as the next
//! level's source components. [`output::OutputWriter`] resolves the
//! resulting communities back into node names and writes them out.
//!
//! The two binaries in `src/bin/` (`cpm` and `cliques`) are thin CLI
//! wrappers around this library; everything here is also usable
//! directly as a crate.

pub mod cli;
pub mod cliques;
pub mod diagnostics;
pub mod error;
pub mod graph;
pub mod loader;
pub mod output;
pub mod percolation;

pub use error::{Error, Result};
