//! `clap`-derived argument parsing for the two binaries, plus validation
//! into immutable config structs.

use std::path::PathBuf;

use clap::Parser;

use crate::error::Error;
use crate::percolation::PercolationConfig;

/// Discover k-clique communities in an undirected graph via the Clique
/// Percolation Method.
#[derive(Debug, Parser)]
#[command(name = "cpm", version, about)]
pub struct PercolateArgs {
    /// Path to the edge-list file.
    pub edge_list: PathBuf,

    /// Directory to write `commK` files into; created if missing.
    pub output_dir: PathBuf,

    /// Minimum clique size to percolate from. Must be at least 3.
    #[arg(short = 'k', long = "k-min")]
    pub k_min: usize,

    /// Maximum k to percolate up to. Defaults to the largest clique
    /// found in the graph.
    #[arg(short = 'K', long = "k-max")]
    pub k_max: Option<usize>,

    /// Treat node tokens as arbitrary strings instead of integers.
    #[arg(long = "string-ids")]
    pub string_ids: bool,

    /// Adaptively rebuild a source component's Bloom filter once its
    /// still-valid clique density has halved.
    #[arg(long = "rebuild-bloom")]
    pub rebuild_bloom: bool,

    /// Emit a `# k\tcount` comment header for every clique size found.
    #[arg(long = "comments")]
    pub comments: bool,
}

/// Validated, immutable configuration for the `cpm` binary.
#[derive(Debug, Clone)]
pub struct PercolateConfig {
    /// Path to the edge-list file.
    pub edge_list: PathBuf,
    /// Output directory for `commK` files.
    pub output_dir: PathBuf,
    /// Whether node tokens are arbitrary strings.
    pub string_ids: bool,
    /// Whether to emit a clique-size comment header.
    pub comments: bool,
    /// The validated percolation parameters.
    pub percolation: PercolationConfig,
}

impl TryFrom<PercolateArgs> for PercolateConfig {
    type Error = Error;

    fn try_from(args: PercolateArgs) -> Result<Self, Error> {
        if args.k_min < 3 {
            return Err(Error::InvalidArgument(format!(
                "k-min must be at least 3, got {}",
                args.k_min
            )));
        }
        if let Some(k_max) = args.k_max {
            if k_max < args.k_min {
                return Err(Error::InvalidArgument(format!(
                    "k-max ({k_max}) must be >= k-min ({})",
                    args.k_min
                )));
            }
        }
        if !args.edge_list.exists() {
            return Err(Error::InvalidArgument(format!(
                "edge list not found: {}",
                args.edge_list.display()
            )));
        }

        Ok(Self {
            edge_list: args.edge_list,
            output_dir: args.output_dir,
            string_ids: args.string_ids,
            comments: args.comments,
            percolation: PercolationConfig {
                k_min: args.k_min,
                k_max: args.k_max,
                rebuild_bloom: args.rebuild_bloom,
            },
        })
    }
}

/// Enumerate maximal cliques of a graph and print them, one per line.
#[derive(Debug, Parser)]
#[command(name = "cliques", version, about)]
pub struct CliquesArgs {
    /// Path to the edge-list file.
    pub edge_list: PathBuf,

    /// Minimum clique size to report. Must be at least 3.
    #[arg(short = 'k', long = "k-min")]
    pub k_min: usize,

    /// Treat node tokens as arbitrary strings instead of integers.
    #[arg(long = "string-ids")]
    pub string_ids: bool,
}

/// Validated, immutable configuration for the `cliques` binary.
#[derive(Debug, Clone)]
pub struct CliquesConfig {
    /// Path to the edge-list file.
    pub edge_list: PathBuf,
    /// Minimum clique size to report.
    pub k_min: usize,
    /// Whether node tokens are arbitrary strings.
    pub string_ids: bool,
}

impl TryFrom<CliquesArgs> for CliquesConfig {
    type Error = Error;

    fn try_from(args: CliquesArgs) -> Result<Self, Error> {
        if args.k_min < 3 {
            return Err(Error::InvalidArgument(format!(
                "k-min must be at least 3, got {}",
                args.k_min
            )));
        }
        if !args.edge_list.exists() {
            return Err(Error::InvalidArgument(format!(
                "edge list not found: {}",
                args.edge_list.display()
            )));
        }

        Ok(Self {
            edge_list: args.edge_list,
            k_min: args.k_min,
            string_ids: args.string_ids,
        })
    }
}
