//! End-to-end scenarios from the specification: build a graph, run the
//! full Graph → CliqueSet → PercolationEngine → OutputWriter pipeline,
//! and check the resulting `commK` files.

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use clique_percolation::cliques::CliqueSet;
use clique_percolation::graph::{Graph, GraphBuilder, NodeId};
use clique_percolation::output::OutputWriter;
use clique_percolation::percolation::{self, PercolationConfig};

static COUNTER: AtomicUsize = AtomicUsize::new(0);

struct TempDir {
    path: PathBuf,
}

impl TempDir {
    fn new() -> Self {
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        let mut path = std::env::temp_dir();
        path.push(format!(
            "clique-percolation-e2e-{}-{n}",
            std::process::id()
        ));
        Self { path }
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

fn graph_from_edges(num_nodes: usize, edges: &[(NodeId, NodeId)]) -> Graph {
    let mut builder = GraphBuilder::new(num_nodes);
    for &(u, v) in edges {
        builder.add_edge(u, v, 0, "n").unwrap();
    }
    builder.build()
}

/// Run the full pipeline and return, for each `commK` file written, the
/// set of lines with their space-separated node names split and sorted
/// (so line order and within-line order are both normalized for
/// comparison — both are intentionally left unspecified by the engine).
fn run_pipeline(
    graph: &Graph,
    k_min: usize,
    k_max: Option<usize>,
) -> (TempDir, Vec<(usize, Vec<Vec<NodeId>>)>) {
    let cliques = CliqueSet::discover(graph, k_min).unwrap();
    let config = PercolationConfig {
        k_min,
        k_max,
        rebuild_bloom: false,
    };
    let levels = percolation::run(&cliques, &config);

    let names = clique_percolation::loader::NodeNames::Int(
        (0..graph.num_nodes() as i64).collect(),
    );
    let dir = TempDir::new();
    let writer = OutputWriter::new(&dir.path);
    for level in &levels {
        writer.write_level(level, &cliques, &names).unwrap();
    }

    let mut results = Vec::new();
    for level in &levels {
        let path = dir.path.join(format!("comm{}", level.k));
        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines: Vec<Vec<NodeId>> = contents
            .lines()
            .map(|line| {
                let mut nodes: Vec<NodeId> =
                    line.split(' ').map(|tok| tok.parse().unwrap()).collect();
                nodes.sort_unstable();
                nodes
            })
            .collect();
        lines.sort();
        results.push((level.k, lines));
    }
    (dir, results)
}

#[test]
fn scenario_1_triangle_graph_forms_one_community_at_k3() {
    let graph = graph_from_edges(3, &[(0, 1), (1, 2), (0, 2)]);
    let (_dir, levels) = run_pipeline(&graph, 3, None);
    assert_eq!(levels, vec![(3, vec![vec![0, 1, 2]])]);
}

#[test]
fn scenario_2_two_disjoint_triangles_form_two_communities() {
    let graph = graph_from_edges(6, &[(0, 1), (1, 2), (0, 2), (3, 4), (4, 5), (3, 5)]);
    let (_dir, levels) = run_pipeline(&graph, 3, None);
    assert_eq!(
        levels,
        vec![(3, vec![vec![0, 1, 2], vec![3, 4, 5]])]
    );
}

#[test]
fn scenario_3_triangles_sharing_an_edge_merge_into_one_community() {
    let graph = graph_from_edges(4, &[(0, 1), (0, 2), (1, 2), (1, 3), (2, 3)]);
    let (_dir, levels) = run_pipeline(&graph, 3, None);
    assert_eq!(levels, vec![(3, vec![vec![0, 1, 2, 3]])]);
}

#[test]
fn scenario_4_k4_percolates_at_k3_and_k4_but_stops_before_k5() {
    let graph = graph_from_edges(
        4,
        &[(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)],
    );
    let (_dir, levels) = run_pipeline(&graph, 3, Some(5));
    assert_eq!(
        levels,
        vec![
            (3, vec![vec![0, 1, 2, 3]]),
            (4, vec![vec![0, 1, 2, 3]]),
        ]
    );
}

#[test]
fn scenario_5_bow_tie_keeps_two_communities_sharing_one_node() {
    let graph = graph_from_edges(5, &[(0, 1), (0, 2), (1, 2), (0, 3), (0, 4), (3, 4)]);
    let (_dir, levels) = run_pipeline(&graph, 3, None);
    let (k, communities) = &levels[0];
    assert_eq!(*k, 3);
    assert_eq!(communities, &vec![vec![0, 1, 2], vec![0, 3, 4]]);

    let shared: BTreeSet<NodeId> = communities[0]
        .iter()
        .copied()
        .filter(|n| communities[1].contains(n))
        .collect();
    assert_eq!(shared, BTreeSet::from([0]));
}

#[test]
fn scenario_6_path_graph_has_no_cliques_above_threshold() {
    let graph = graph_from_edges(4, &[(0, 1), (1, 2), (2, 3)]);
    let err = CliqueSet::discover(&graph, 3).unwrap_err();
    assert!(matches!(
        err,
        clique_percolation::Error::NoCliquesAboveThreshold { k_min: 3 }
    ));
}

#[test]
fn running_the_pipeline_twice_yields_identical_output() {
    let graph = graph_from_edges(4, &[(0, 1), (0, 2), (1, 2), (1, 3), (2, 3)]);
    let (_dir_a, levels_a) = run_pipeline(&graph, 3, None);
    let (_dir_b, levels_b) = run_pipeline(&graph, 3, None);
    assert_eq!(levels_a, levels_b);
}
