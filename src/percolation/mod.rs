//! The clique percolation engine: BloomTree-pruned community growth
//! across increasing values of k.

mod assigned_branches;
mod bloom_tree;
mod engine;
mod partition;

pub use assigned_branches::AssignedBranches;
pub use bloom_tree::{BloomTree, BLOOM_BITS};
pub use engine::{run, LevelCommunities, PercolationConfig};
pub use partition::{ComponentId, PartitionStore};
