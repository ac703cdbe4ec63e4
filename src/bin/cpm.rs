//! `cpm`: discover k-clique communities in an edge-list graph via the
//! Clique Percolation Method, writing one `commK` file per percolated
//! level.

use std::collections::BTreeMap;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser as _;

use clique_percolation::cli::{PercolateArgs, PercolateConfig};
use clique_percolation::cliques::CliqueSet;
use clique_percolation::diagnostics;
use clique_percolation::loader::load_edge_list;
use clique_percolation::output::OutputWriter;
use clique_percolation::percolation;

fn main() -> ExitCode {
    env_logger::init();

    let args = PercolateArgs::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("cpm: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: PercolateArgs) -> clique_percolation::Result<()> {
    let config = PercolateConfig::try_from(args)?;

    let started = Instant::now();
    let loaded = load_edge_list(&config.edge_list, config.string_ids)?;
    diagnostics::log_network_loaded(
        loaded.graph.num_nodes(),
        loaded.graph.num_edges(),
        loaded.graph.max_degree(),
        started.elapsed(),
    );

    let cliques = CliqueSet::discover(&loaded.graph, config.percolation.k_min)?;

    let mut size_counts: BTreeMap<usize, usize> = BTreeMap::new();
    for (_, members) in cliques.of_size_at_least(config.percolation.k_min) {
        *size_counts.entry(members.len()).or_insert(0) += 1;
    }
    let frequencies: Vec<(usize, usize)> = size_counts.into_iter().collect();
    diagnostics::log_clique_frequencies(&frequencies);
    if config.comments {
        for &(size, count) in &frequencies {
            println!("# {size}\t{count}");
        }
    }
    diagnostics::log_memory_usage();

    let levels = percolation::run(&cliques, &config.percolation);

    let writer = OutputWriter::new(&config.output_dir);
    for level in &levels {
        writer.write_level(level, &cliques, &loaded.names)?;
        diagnostics::log_level_complete(level.k, level.communities.len(), started.elapsed());
    }

    Ok(())
}
