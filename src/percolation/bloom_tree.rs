//! A Bloom-filter-indexed perfect binary tree over clique membership,
//! used to prune the adjacency search between cliques during
//! percolation.

use bitvec::prelude::{BitVec, Lsb0};
use rustc_hash::FxHasher;
use std::hash::Hasher;

use crate::graph::NodeId;

/// Number of bits in the underlying Bloom filter (~1.25 GiB). A fixed
/// design constant: the filter is never auto-sized, only recompiled.
pub const BLOOM_BITS: u64 = 10_000_000_000;

/// A branch identifier within the perfect binary tree: `1` is the
/// (never populated) root, leaves occupy `[power_of_two, 2*power_of_two)`.
pub type BranchId = u32;

/// A Bloom-filter-indexed perfect binary tree over `power_of_two` leaves.
///
/// Each internal node `b` conceptually summarizes the union of node ids
/// across every clique in its subtree. Rather than storing that set
/// directly, membership is recorded in one shared Bloom filter keyed by
/// `(b, node_id)`, so [`BloomTree::overlap_estimate`] never
/// under-counts: false positives are possible, false negatives are not.
#[derive(Debug)]
pub struct BloomTree {
    bits: BitVec<u64, Lsb0>,
    power_of_two: u32,
}

fn bit_index(branch: BranchId, node: NodeId) -> u64 {
    let key = (u64::from(branch) << 32) | u64::from(node);
    let mut hasher = FxHasher::default();
    hasher.write_u64(key);
    hasher.finish() % BLOOM_BITS
}

impl BloomTree {
    /// Build an empty tree over `power_of_two` leaves (the next power of
    /// two at or above the clique count).
    #[must_use]
    pub fn new(power_of_two: u32) -> Self {
        Self {
            bits: BitVec::repeat(false, BLOOM_BITS as usize),
            power_of_two,
        }
    }

    /// The tree's leaf count (a power of two).
    #[must_use]
    pub fn power_of_two(&self) -> u32 {
        self.power_of_two
    }

    /// The number of set bits in the underlying Bloom filter, for
    /// occupancy diagnostics.
    #[must_use]
    pub fn occupied_bits(&self) -> u64 {
        self.bits.count_ones() as u64
    }

    /// Clear every bit without freeing the underlying allocation, ready
    /// to be repopulated for a new source component.
    pub fn clear(&mut self) {
        self.bits.fill(false);
    }

    /// Record `members` as belonging to the clique at `leaf_branch`,
    /// propagating the membership up to every ancestor branch. The root
    /// (branch `1`) is never populated.
    pub fn add_clique(&mut self, members: &[NodeId], leaf_branch: BranchId) {
        let mut b = leaf_branch;
        while b > 1 {
            for &node in members {
                let idx = bit_index(b, node);
                self.bits.set(idx as usize, true);
            }
            b >>= 1;
        }
    }

    /// A conservative upper bound on `|members ∩ summarized(branch)|`,
    /// short-circuiting once the running count reaches `threshold` (the
    /// caller only cares whether the estimate meets a threshold) or once
    /// the remaining members can no longer reach it.
    ///
    /// # Panics
    /// Panics if `branch` is the root (`1`): the root is never
    /// populated, so querying it is a caller error.
    #[must_use]
    pub fn overlap_estimate(&self, members: &[NodeId], branch: BranchId, threshold: usize) -> usize {
        assert!(branch > 1, "the root branch is never populated");
        let mut count = 0usize;
        for (i, &node) in members.iter().enumerate() {
            if self.bits[bit_index(branch, node) as usize] {
                count += 1;
                if count >= threshold {
                    return count;
                }
            }
            let remaining = members.len() - i - 1;
            if count + remaining < threshold {
                return 0;
            }
        }
        count
    }
}
