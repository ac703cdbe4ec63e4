//! Maximal clique enumeration: a Bron–Kerbosch variant with a pivot chosen
//! to minimize branching, working from sorted `Not`/`Candidates` lists.

use crate::error::Error;
use crate::graph::{Graph, NodeId};

/// Enumerate every maximal clique of size at least `min_size`, calling
/// `sink` once per clique found. Cliques are not emitted in any
/// particular order and each is an unordered (ascending, by construction)
/// set of node ids.
///
/// This walks each node `v` as a potential clique seed, splitting its
/// neighbours into `Not` (neighbours below `v`, already explored as a
/// seed themselves) and `Candidates` (neighbours above `v`), then
/// recursively extends `Compsub` using candidates that survive
/// elimination against a chosen pivot.
///
/// # Errors
/// Returns [`Error::InvalidArgument`] if `min_size < 3`: below that,
/// "clique" and "edge" coincide and the percolation threshold `t = k-1`
/// would be meaningless.
pub fn enumerate_cliques<F>(graph: &Graph, min_size: usize, mut sink: F) -> Result<(), Error>
where
    F: FnMut(&[NodeId]),
{
    if min_size < 3 {
        return Err(Error::InvalidArgument(format!(
            "k-min must be at least 3, got {min_size}"
        )));
    }
    for v in 0..graph.num_nodes() as NodeId {
        clique_seeds_for_node(graph, min_size, v, &mut sink);
    }
    Ok(())
}

fn clique_seeds_for_node<F>(graph: &Graph, min_size: usize, v: NodeId, sink: &mut F)
where
    F: FnMut(&[NodeId]),
{
    let degree = graph.degree(v);
    if degree + 1 < min_size {
        return;
    }

    let mut not = Vec::new();
    let mut candidates = Vec::new();
    for &neighbour in graph.neighbours(v) {
        if neighbour < v {
            not.push(neighbour);
        } else if neighbour > v {
            candidates.push(neighbour);
        }
    }
    debug_assert_eq!(not.len() + candidates.len(), degree);

    let mut compsub = vec![v];
    expand(graph, min_size, &mut compsub, not, candidates, sink);
}

/// Extend `compsub` with an element of `candidates`, recurse, then
/// restore `compsub` (and `not`/`candidates`, which are owned copies, are
/// simply dropped on return from the callee).
fn try_candidate<F>(
    graph: &Graph,
    min_size: usize,
    compsub: &mut Vec<NodeId>,
    not: &[NodeId],
    candidates: &[NodeId],
    selected: NodeId,
    sink: &mut F,
) where
    F: FnMut(&[NodeId]),
{
    compsub.push(selected);

    let selected_neighbours = graph.neighbours(selected);
    let new_candidates = sorted_intersection(candidates, selected_neighbours);
    let new_not = sorted_intersection(not, selected_neighbours);

    expand(graph, min_size, compsub, new_not, new_candidates, sink);

    compsub.pop();
}

fn sorted_intersection(a: &[NodeId], b: &[NodeId]) -> Vec<NodeId> {
    let mut out = Vec::new();
    crate::graph::for_each_common(a, b, |n| out.push(n));
    out
}

fn insert_sorted(list: &mut Vec<NodeId>, value: NodeId) {
    let pos = list.partition_point(|&x| x < value);
    list.insert(pos, value);
}

fn remove_sorted(list: &mut Vec<NodeId>, value: NodeId) {
    let pos = list.binary_search(&value).expect("value must be present");
    list.remove(pos);
}

/// The core recursive step: given the current partial clique `compsub`
/// plus its `not`/`candidates` frontier, either emit `compsub` as a
/// maximal clique or branch on a pivot chosen to minimize the number of
/// candidates that must be tried.
fn expand<F>(
    graph: &Graph,
    min_size: usize,
    compsub: &mut Vec<NodeId>,
    not: Vec<NodeId>,
    mut candidates: Vec<NodeId>,
    sink: &mut F,
) where
    F: FnMut(&[NodeId]),
{
    if candidates.len() + compsub.len() < min_size {
        return;
    }

    if candidates.is_empty() {
        if not.is_empty() && compsub.len() >= min_size {
            sink(compsub);
        }
        return;
    }

    // Choose the vertex in `not` ++ `candidates` with the fewest
    // disconnections to `candidates`: it admits the fewest branches. A
    // candidate found in `not` that is connected to every remaining
    // candidate means the whole subtree is already covered by an
    // earlier seed, so we can stop immediately.
    let mut fewest_disc = usize::MAX;
    let mut fewest_disc_vertex = candidates[0];
    let mut fewest_is_in_candidates = false;
    for &v in not.iter().chain(candidates.iter()) {
        let mut disconnections = 0;
        for &candidate in &candidates {
            if !graph.are_connected(v, candidate) {
                disconnections += 1;
            }
        }
        if disconnections < fewest_disc {
            fewest_disc = disconnections;
            fewest_disc_vertex = v;
            fewest_is_in_candidates = candidates.binary_search(&v).is_ok();
            if !fewest_is_in_candidates && fewest_disc == 0 {
                return;
            }
        }
    }

    let mut not = not;
    let candidates_snapshot = candidates.clone();
    for v in candidates_snapshot {
        if candidates.len() + compsub.len() < min_size {
            return;
        }
        if fewest_disc > 0 && v != fewest_disc_vertex && !graph.are_connected(v, fewest_disc_vertex)
        {
            if candidates.len() + compsub.len() < min_size {
                return;
            }
            remove_sorted(&mut candidates, v);
            try_candidate(graph, min_size, compsub, &not, &candidates, v, sink);
            insert_sorted(&mut not, v);
            fewest_disc -= 1;
        }
    }

    if fewest_is_in_candidates && candidates.len() + compsub.len() >= min_size {
        remove_sorted(&mut candidates, fewest_disc_vertex);
        try_candidate(
            graph,
            min_size,
            compsub,
            &not,
            &candidates,
            fewest_disc_vertex,
            sink,
        );
    }
}
