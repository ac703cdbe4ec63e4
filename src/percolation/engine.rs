//! Drives the level-by-level clique percolation search.

use std::time::Instant;

use crate::cliques::{CliqueId, CliqueSet};
use crate::diagnostics;
use crate::graph::NodeId;

use super::assigned_branches::AssignedBranches;
use super::bloom_tree::{BloomTree, BranchId, BLOOM_BITS};
use super::partition::{ComponentId, PartitionStore};

/// Validated parameters driving one percolation run.
#[derive(Debug, Clone)]
pub struct PercolationConfig {
    /// The smallest k to percolate at.
    pub k_min: usize,
    /// The largest k to percolate at, capped to the largest clique size
    /// found. `None` means "percolate up to the largest clique size".
    pub k_max: Option<usize>,
    /// Whether to adaptively rebuild a source component's `BloomTree`
    /// mid-search once its still-valid clique density has halved.
    pub rebuild_bloom: bool,
}

/// The communities found at one value of k, as sets of [`CliqueId`]s.
/// [`crate::output::OutputWriter`] resolves these into node-name lines.
#[derive(Debug)]
pub struct LevelCommunities {
    /// The k this level was percolated at.
    pub k: usize,
    /// Each community's member clique ids.
    pub communities: Vec<Vec<CliqueId>>,
}

/// The smallest power of two at least `n`, floored at `2` so a leaf
/// index never collides with the tree's root (branch `1`).
fn next_pow2(n: usize) -> u32 {
    let mut p: u32 = 2;
    while (p as usize) < n {
        p <<= 1;
    }
    p
}

fn sorted_intersection_len(a: &[NodeId], b: &[NodeId]) -> usize {
    let mut count = 0;
    crate::graph::for_each_common(a, b, |_| count += 1);
    count
}

/// Run clique percolation over `cliques` for every k in
/// `config.k_min..=k_max`.
///
/// Returns one [`LevelCommunities`] per level. Even a single clique
/// still yields a (singleton) community at every level it is large
/// enough for, since it trivially percolates with itself.
#[must_use = "percolation results must be written out to be useful"]
pub fn run(cliques: &CliqueSet, config: &PercolationConfig) -> Vec<LevelCommunities> {
    let num_cliques = cliques.len();

    let max_clique_size = cliques.max_clique_size();
    let k_max = config.k_max.unwrap_or(max_clique_size).min(max_clique_size);
    let power_of_two = next_pow2(num_cliques);

    let mut partition = PartitionStore::new(num_cliques);
    partition.collapse_all_into_component_zero();
    let mut source_components = vec![0usize];

    // The leaf count never changes across the run (it depends only on the
    // fixed clique count), so one `BLOOM_BITS`-sized allocation is reused
    // for every source component at every level via `clear()`, rather
    // than re-allocating and re-zeroing ~1.25 GiB per source.
    let mut tree = BloomTree::new(power_of_two);

    let mut levels = Vec::new();

    for k in config.k_min..=k_max {
        let t = k - 1;
        let mut assigned = AssignedBranches::new(power_of_two, num_cliques);
        for c in 0..num_cliques {
            if cliques.size(c) <= t {
                assigned.mark_as_done(power_of_two + c as u32);
            }
        }

        let mut found_communities = Vec::new();

        while let Some(source) = source_components.pop() {
            tree.clear();
            let build_started = Instant::now();
            let mut cliques_in_tree = populate_tree(&mut tree, cliques, &partition, source, power_of_two);
            diagnostics::log_bloom_occupancy(
                k,
                tree.occupied_bits(),
                BLOOM_BITS,
                build_started.elapsed(),
            );

            while let Some(seed) = partition.members(source).next() {
                let community = grow_community(
                    k,
                    seed,
                    source,
                    &mut partition,
                    cliques,
                    &mut assigned,
                    &mut tree,
                    &mut cliques_in_tree,
                    t,
                    power_of_two,
                    config.rebuild_bloom,
                );
                found_communities.push(community);
            }
        }

        let is_last_level = k == k_max;
        if !is_last_level {
            let (next_partition, next_sources) =
                next_level_sources(&found_communities, cliques, k + 1, num_cliques);
            partition = next_partition;
            source_components = next_sources;
        }

        levels.push(LevelCommunities {
            k,
            communities: found_communities,
        });

        if is_last_level {
            break;
        }
    }

    levels
}

fn populate_tree(
    tree: &mut BloomTree,
    cliques: &CliqueSet,
    partition: &PartitionStore,
    source: ComponentId,
    power_of_two: u32,
) -> usize {
    let mut count = 0;
    for cid in partition.members(source).collect::<Vec<_>>() {
        tree.add_clique(cliques.members(cid), power_of_two + cid as u32);
        count += 1;
    }
    count
}

#[allow(clippy::too_many_arguments)]
fn grow_community(
    k: usize,
    seed: CliqueId,
    source: ComponentId,
    partition: &mut PartitionStore,
    cliques: &CliqueSet,
    assigned: &mut AssignedBranches,
    tree: &mut BloomTree,
    cliques_in_tree: &mut usize,
    t: usize,
    power_of_two: u32,
    rebuild_bloom: bool,
) -> Vec<CliqueId> {
    let component_to_grow = partition.create_empty_component();
    partition.move_node(seed, component_to_grow, source);
    assigned.mark_as_done(power_of_two + seed as u32);

    let mut frontier = vec![seed];
    let mut members = vec![seed];

    while let Some(u) = frontier.pop() {
        if rebuild_bloom {
            let remaining_in_source = partition.members(source).count();
            if remaining_in_source > 100 && 2 * remaining_in_source < *cliques_in_tree {
                let rebuild_started = Instant::now();
                tree.clear();
                *cliques_in_tree = populate_tree(tree, cliques, partition, source, power_of_two);
                diagnostics::log_bloom_occupancy(
                    k,
                    tree.occupied_bits(),
                    BLOOM_BITS,
                    rebuild_started.elapsed(),
                );
            }
        }

        let mut newly_found = Vec::new();
        search(
            tree,
            1,
            cliques.members(u),
            t,
            partition,
            cliques,
            source,
            assigned,
            power_of_two,
            &mut newly_found,
        );

        for found in newly_found {
            partition.move_node(found, component_to_grow, source);
            assigned.mark_as_done(power_of_two + found as u32);
            frontier.push(found);
            members.push(found);
        }
    }

    members
}

/// Narrow `b` down to the deepest branch reachable purely by the
/// single-not-done-child shortcut, or `None` if `b` is already fully
/// assigned.
fn effective_branch(mut b: BranchId, power_of_two: u32, assigned: &AssignedBranches) -> Option<BranchId> {
    loop {
        if assigned.is_done(b) {
            return None;
        }
        if b < power_of_two {
            let left = b << 1;
            let right = left + 1;
            let left_done = assigned.is_done(left);
            let right_done = assigned.is_done(right);
            if left_done && !right_done {
                b = right;
                continue;
            }
            if right_done && !left_done {
                b = left;
                continue;
            }
        }
        return Some(b);
    }
}

#[allow(clippy::too_many_arguments)]
fn search(
    tree: &BloomTree,
    b: BranchId,
    current_members: &[NodeId],
    t: usize,
    partition: &PartitionStore,
    cliques: &CliqueSet,
    source_component: ComponentId,
    assigned: &mut AssignedBranches,
    power_of_two: u32,
    found: &mut Vec<CliqueId>,
) {
    let Some(b) = effective_branch(b, power_of_two, assigned) else {
        return;
    };

    if b > 1 {
        let est = tree.overlap_estimate(current_members, b, t);
        if est < t {
            return;
        }
    }

    if b >= power_of_two {
        let c = (b - power_of_two) as CliqueId;
        debug_assert_eq!(
            partition.component_of(c),
            source_component,
            "reached a leaf outside the source component being searched"
        );
        let actual = sorted_intersection_len(cliques.members(c), current_members);
        if actual >= t {
            found.push(c);
            assigned.mark_as_done(b);
        }
        return;
    }

    let left = b << 1;
    let right = left + 1;
    search(
        tree,
        left,
        current_members,
        t,
        partition,
        cliques,
        source_component,
        assigned,
        power_of_two,
        found,
    );
    search(
        tree,
        right,
        current_members,
        t,
        partition,
        cliques,
        source_component,
        assigned,
        power_of_two,
        found,
    );
}

/// Each found community becomes its own candidate source component at
/// `next_k` iff it contains at least one clique of size `>= next_k`
/// (cliques too small for the next level are dropped, left behind in
/// the fresh store's shared component `0`). Communities are never
/// merged into a shared source: percolation at the next level proceeds
/// independently inside each one.
fn next_level_sources(
    found_communities: &[Vec<CliqueId>],
    cliques: &CliqueSet,
    next_k: usize,
    num_cliques: usize,
) -> (PartitionStore, Vec<ComponentId>) {
    let mut next_partition = PartitionStore::new(num_cliques);
    next_partition.collapse_all_into_component_zero();

    let mut sources = Vec::new();
    for community in found_communities {
        let qualifying: Vec<CliqueId> = community
            .iter()
            .copied()
            .filter(|&cid| cliques.size(cid) >= next_k)
            .collect();
        if qualifying.is_empty() {
            continue;
        }
        let source = next_partition.create_empty_component();
        for cid in qualifying {
            next_partition.move_node(cid, source, 0);
        }
        sources.push(source);
    }
    (next_partition, sources)
}
